pub mod field_delivery;
