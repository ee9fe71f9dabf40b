use arpscope_domain::{representative_address, EgressPath, Route, RouteError};
use async_trait::async_trait;
use ipnetwork::IpNetwork;

#[async_trait]
pub trait RouteResolver: Send + Sync {
    /// Find the interface and local address the OS would use to reach `target`.
    async fn resolve(&self, target: &str) -> Result<EgressPath, RouteError>;

    /// Resolve the route toward a monitored network by probing its
    /// representative address.
    async fn resolve_route(&self, network: IpNetwork) -> Result<Route, RouteError> {
        let target = representative_address(network).to_string();
        let egress = self.resolve(&target).await?;
        Ok(Route::from_egress(network, egress))
    }
}
