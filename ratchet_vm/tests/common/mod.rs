use ratchet_vm::{
    ecmascript::{
        builtins::register_default_plugins,
        execution::{Agent, DefaultHostHooks, Options},
        scripts_and_modules::script::evaluate_script,
    },
    engine::debug_string,
};

/// Evaluate `source` in a fresh realm and render the completion value (or
/// the thrown value) with the inspection printer.
pub fn eval(source: &str) -> Result<String, String> {
    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    register_default_plugins(&mut agent);
    let realm = agent.create_default_realm().unwrap();
    agent.run_in_realm(realm, |agent| {
        match evaluate_script(agent, source.to_owned(), realm) {
            Ok(value) => Ok(debug_string(agent, value, 6)),
            Err(error) => Err(debug_string(agent, error.value(), 6)),
        }
    })
}

/// Assert that a script completes normally with the expected rendering.
#[track_caller]
pub fn assert_normal(source: &str, expected: &str) {
    match eval(source) {
        Ok(actual) => assert_eq!(actual, expected, "script: {source}"),
        Err(thrown) => panic!("script threw {thrown}: {source}"),
    }
}

/// Assert that a script throws, and that the rendering of the thrown value
/// starts with the expected prefix (e.g. an error kind).
#[track_caller]
pub fn assert_throws(source: &str, expected_prefix: &str) {
    match eval(source) {
        Ok(value) => panic!("script completed with {value}: {source}"),
        Err(thrown) => assert!(
            thrown.starts_with(expected_prefix),
            "expected a {expected_prefix} throw, got {thrown}: {source}"
        ),
    }
}
