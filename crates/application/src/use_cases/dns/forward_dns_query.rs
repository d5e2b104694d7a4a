use crate::ports::DnsForwarder;
use bytes::Bytes;
use ferrous_doh_domain::{DnsRequest, DomainError, HexBytes, ListenAdmission, TransportKind};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Use case: relay one client query to the DoH upstream.
///
/// UDP queries pass the listen address admission rule first. TCP queries
/// are admitted unconditionally unless TCP admission is switched on.
pub struct ForwardDnsQueryUseCase {
    forwarder: Arc<dyn DnsForwarder>,
    admission: ListenAdmission,
    tcp_admission: bool,
}

impl ForwardDnsQueryUseCase {
    pub fn new(forwarder: Arc<dyn DnsForwarder>, admission: ListenAdmission) -> Self {
        Self {
            forwarder,
            admission,
            tcp_admission: false,
        }
    }

    pub fn with_tcp_admission(mut self, enabled: bool) -> Self {
        self.tcp_admission = enabled;
        self
    }

    fn requires_admission(&self, transport: TransportKind) -> bool {
        match transport {
            TransportKind::Udp => true,
            TransportKind::Tcp => self.tcp_admission,
        }
    }

    pub fn is_admitted(&self, request: &DnsRequest) -> bool {
        !self.requires_admission(request.transport) || self.admission.admits(&request.client)
    }

    pub async fn execute(&self, request: &DnsRequest) -> Result<Bytes, DomainError> {
        info!(
            transport = %request.transport,
            client = %request.client,
            len = request.payload.len(),
            "Received DNS request"
        );
        trace!(payload = %HexBytes(&request.payload), "Request payload");

        if !self.is_admitted(request) {
            let host = ListenAdmission::client_host(&request.client);
            warn!(
                transport = %request.transport,
                client = %host,
                listen_address = self.admission.listen_address(),
                "Rejected DNS request"
            );
            return Err(DomainError::AdmissionRejected(host));
        }

        let start = Instant::now();
        let response = self.forwarder.forward(&request.payload).await?;

        debug!(
            transport = %request.transport,
            client = %request.client,
            len = response.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Received DoH response"
        );
        trace!(payload = %HexBytes(&response), "Response payload");

        Ok(response)
    }
}
