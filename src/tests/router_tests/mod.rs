mod export_tests;
mod search_tests;
