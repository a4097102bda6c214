mod cli_parse;
mod journal_file;
mod persistence_roundtrip;
mod shell_session;
mod simulator_properties;
mod simulator_scenarios;
