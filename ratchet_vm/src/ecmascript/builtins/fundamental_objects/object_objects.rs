pub mod object_constructor;
pub mod object_prototype;
