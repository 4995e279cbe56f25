pub mod noughts;
