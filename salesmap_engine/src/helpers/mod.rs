mod address;

pub use address::format_address;
