//! Integration tests against an in-process fake catalog API

mod support;

mod panel_tests;
mod remote_tests;
