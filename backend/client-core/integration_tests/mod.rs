mod app_tests;
mod gateway;
