pub mod enumeration_test;
pub mod sql_injection_test;
