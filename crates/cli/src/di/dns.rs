use ferrous_doh_application::ports::DnsForwarder;
use ferrous_doh_application::use_cases::ForwardDnsQueryUseCase;
use ferrous_doh_domain::{Config, ListenAdmission};
use ferrous_doh_infrastructure::dns::{DohForwarder, InflightLimitForwarder};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub forward_query: Arc<ForwardDnsQueryUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let forwarder = Self::build_forwarder(config)?;

        let admission = ListenAdmission::new(config.server.listen_address.clone());
        let forward_query = Arc::new(
            ForwardDnsQueryUseCase::new(forwarder, admission)
                .with_tcp_admission(config.server.tcp_admission),
        );

        Ok(Self { forward_query })
    }

    fn build_forwarder(config: &Config) -> anyhow::Result<Arc<dyn DnsForwarder>> {
        let doh = DohForwarder::new(&config.upstream)?;

        info!(
            url = %doh.url(),
            pinned = %doh.server(),
            "DoH upstream configured"
        );

        Ok(match config.server.max_inflight_requests {
            Some(limit) => {
                info!(limit, "In-flight query limit enabled");
                Arc::new(InflightLimitForwarder::new(doh, limit))
            }
            None => Arc::new(doh),
        })
    }
}
