pub mod boolean_constructor;
pub mod boolean_prototype;
