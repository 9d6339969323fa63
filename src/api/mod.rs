pub mod play_by_play;
