pub mod accessor;
pub mod cursor;
pub mod datatype;
pub mod dialect;
pub mod value;
pub mod vendor;
