pub mod imre;
