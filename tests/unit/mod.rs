mod config_test;
mod session_store_test;
