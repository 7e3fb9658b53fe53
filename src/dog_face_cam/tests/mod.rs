mod core_test;
mod worker_test;
