mod cfg_provider;

pub use cfg_provider::CfgProvider;
