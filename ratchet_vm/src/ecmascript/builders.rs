pub mod builtin_function_builder;
pub mod ordinary_object_builder;
pub mod property_builder;
