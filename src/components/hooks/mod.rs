pub mod use_tooltip_id;

pub use use_tooltip_id::use_tooltip_id;
