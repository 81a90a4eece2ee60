use super::agent::HostHooks;

/// The default host: console output to stdout, plain interrupt errors.
#[derive(Debug)]
pub struct DefaultHostHooks;

impl HostHooks for DefaultHostHooks {}
