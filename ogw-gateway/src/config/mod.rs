use config::FileFormat;
use lazy_static_include::*;
use serde_derive::Deserialize;
use tracing::debug;

lazy_static_include_str! {
    DEFAULT_CONFIG => "src/config/default.toml",
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) gateway: GatewayConfig,
    pub(crate) chain: ChainConfig,
    pub(crate) prometheus: PrometheusConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct GatewayConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct ChainConfig {
    /// JSON-RPC endpoint serving the chain the resolver contract lives on.
    pub(crate) rpc_url: String,

    /// Address of the resolver contract answering `text`/`data` reads.
    pub(crate) resolver_address: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct PrometheusConfig {
    pub(crate) port: u16,
}

impl GatewayConfig {
    pub fn validate(&self) {
        assert!(!self.host.is_empty(), "Listen host is required");
    }
}

impl ChainConfig {
    pub fn validate(&self) {
        assert!(!self.rpc_url.is_empty(), "RPC endpoint URL is required");
        assert!(
            !self.resolver_address.is_empty(),
            "Resolver contract address is required"
        );
    }
}

impl Config {
    pub fn load(local_file: Option<String>) -> Config {
        let mut config_builder = config::Config::builder();
        config_builder = config_builder.add_source(config::File::from_str(
            &DEFAULT_CONFIG,
            FileFormat::Toml,
        ));

        if let Some(local_file) = local_file {
            debug!("Loading local configuration from {}", local_file);
            config_builder = config_builder.add_source(config::File::with_name(&local_file));
        }

        let config_builder = config_builder
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .ignore_empty(true),
            )
            .build()
            .expect("Could not load configuration");

        config_builder
            .try_deserialize()
            .expect("Could not deserialize configuration")
    }

    pub fn validate(&self) {
        self.gateway.validate();
        self.chain.validate();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_parse() {
        let config = Config::load(None);
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.prometheus.port, 9100);
    }

    #[test]
    #[should_panic(expected = "RPC endpoint URL is required")]
    fn missing_chain_endpoint_is_fatal() {
        let config = ChainConfig {
            rpc_url: String::new(),
            resolver_address: "0x0000000000000000000000000000000000000000".to_owned(),
        };
        config.validate();
    }

    #[test]
    #[should_panic(expected = "Resolver contract address is required")]
    fn missing_resolver_address_is_fatal() {
        let config = ChainConfig {
            rpc_url: "http://localhost:8545".to_owned(),
            resolver_address: String::new(),
        };
        config.validate();
    }
}
