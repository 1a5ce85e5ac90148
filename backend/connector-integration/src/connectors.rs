pub mod bpoint;

pub use self::bpoint::Bpoint;
