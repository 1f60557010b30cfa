pub mod encoder_listener;
