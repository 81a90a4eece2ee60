mod common;

use std::rc::Rc;

use common::assert_normal;
use ratchet_vm::{
    ecmascript::{
        builtins::{register_default_plugins, FundamentalObjectsPlugin},
        execution::{Agent, DefaultHostHooks, Options},
        plugins::{Plugin, PluginError},
        scripts_and_modules::script::evaluate_script,
    },
    engine::debug_string,
};

fn eval_in(agent: &mut Agent, realm: ratchet_vm::ecmascript::execution::RealmIdentifier, source: &str) -> Result<String, String> {
    agent.run_in_realm(realm, |agent| {
        match evaluate_script(agent, source.to_owned(), realm) {
            Ok(value) => Ok(debug_string(agent, value, 6)),
            Err(error) => Err(debug_string(agent, error.value(), 6)),
        }
    })
}

#[test]
fn realms_are_isolated() {
    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    register_default_plugins(&mut agent);
    let first = agent.create_default_realm().unwrap();
    let second = agent.create_default_realm().unwrap();

    assert_eq!(eval_in(&mut agent, first, "var shared = 1; shared"), Ok("1".to_owned()));
    assert_eq!(
        eval_in(&mut agent, second, "typeof shared"),
        Ok("'undefined'".to_owned())
    );
    // Each realm has its own intrinsics.
    assert_eq!(
        eval_in(&mut agent, first, "Object.marker = 'first'; Object.marker"),
        Ok("'first'".to_owned())
    );
    assert_eq!(
        eval_in(&mut agent, second, "Object.marker"),
        Ok("undefined".to_owned())
    );
}

#[test]
fn plugins_subset_the_language() {
    // A realm with only the fundamental objects: no Array, Set or console.
    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    agent
        .register_plugin(Rc::new(FundamentalObjectsPlugin))
        .unwrap();
    let realm = agent.create_default_realm().unwrap();
    assert_eq!(
        eval_in(
            &mut agent,
            realm,
            "[typeof Object, typeof Array, typeof Set, typeof console].join()"
        ),
        Ok("'function,undefined,undefined,undefined'".to_owned())
    );
}

#[test]
fn plugin_registry_rejects_bad_graphs() {
    #[derive(Debug)]
    struct NeedsMissing;
    impl Plugin for NeedsMissing {
        fn id(&self) -> &'static str {
            "needs_missing"
        }
        fn dependencies(&self) -> &'static [&'static str] {
            &["not_registered"]
        }
        fn create_intrinsics(
            &self,
            _agent: &mut Agent,
            _realm: ratchet_vm::ecmascript::execution::RealmIdentifier,
        ) {
        }
    }

    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    agent.register_plugin(Rc::new(FundamentalObjectsPlugin)).unwrap();
    agent.register_plugin(Rc::new(NeedsMissing)).unwrap();
    assert!(matches!(
        agent.create_default_realm(),
        Err(PluginError::UnknownDependency { .. })
    ));

    // Duplicate registration is rejected immediately.
    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    agent.register_plugin(Rc::new(FundamentalObjectsPlugin)).unwrap();
    assert!(matches!(
        agent.register_plugin(Rc::new(FundamentalObjectsPlugin)),
        Err(PluginError::DuplicateId(_))
    ));
}

#[test]
fn step_budget_interrupts_run_teardown() {
    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    register_default_plugins(&mut agent);
    let realm = agent.create_default_realm().unwrap();

    agent.set_step_budget(10_000);
    let result = eval_in(
        &mut agent,
        realm,
        "var cleaned = false; try { for (;;) {} } finally { cleaned = true; }",
    );
    // The interrupt surfaces as a throw completion.
    let thrown = result.unwrap_err();
    assert!(thrown.starts_with("Error"), "unexpected interrupt value: {thrown}");

    // The finally block ran during the interrupt's unwinding.
    assert_eq!(eval_in(&mut agent, realm, "cleaned"), Ok("true".to_owned()));
}

#[test]
fn console_prints_through_the_host() {
    // The console shim formats and swallows its arguments.
    assert_normal("console.log('hello', 1, [2, 3])", "undefined");
    assert_normal("typeof console.error", "'function'");
}
