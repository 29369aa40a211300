pub mod backend_tests;
