mod reset_event_tests;
mod stress_tests;
mod volatile_tests;
mod yielding_tests;
