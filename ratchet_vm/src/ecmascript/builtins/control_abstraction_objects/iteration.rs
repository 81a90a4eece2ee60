pub mod iterator_prototype;
