pub mod agent;
pub mod default_host_hooks;
pub mod environments;
pub mod execution_context;
pub mod realm;

pub use agent::{Agent, ExceptionType, HostHooks, JsError, JsResult, Options};
pub use default_host_hooks::DefaultHostHooks;
pub use environments::EnvironmentIndex;
pub use realm::{ProtoIntrinsics, Realm, RealmIdentifier};
