mod e2e_test;
mod nba_test;
mod source_test;
