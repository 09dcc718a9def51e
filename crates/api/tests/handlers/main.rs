mod assignments_test;
mod calendar_test;
mod middleware_test;
mod test_utils;
