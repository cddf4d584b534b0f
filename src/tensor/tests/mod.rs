mod new_tests;
mod print_tests;
mod reduce_tests;
mod shape_tests;
