// Application commands

pub mod purchase_commands;
pub mod transfer_commands;
pub mod validation_commands;
