mod config;
mod draws;
mod runner;
mod screen;
