pub mod game_log;
