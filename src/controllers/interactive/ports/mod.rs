pub mod delivery_port;
