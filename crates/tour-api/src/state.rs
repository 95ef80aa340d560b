use std::sync::Arc;

use tour_client::{ApiClient, AuthClient};

use crate::middleware::access::AccessPolicy;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub auth: AuthClient,
    pub policy: Arc<AccessPolicy>,
}
