mod commands;
mod persistence;
