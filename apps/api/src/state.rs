use std::sync::Arc;

use login_throttle_application::LoginThrottleService;

use crate::client_key::ClientKeyResolver;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub login_throttle: LoginThrottleService,
    pub client_key_resolver: Arc<ClientKeyResolver>,
}

impl AppState {
    pub fn new(login_throttle: LoginThrottleService, client_key_resolver: ClientKeyResolver) -> Self {
        Self {
            login_throttle,
            client_key_resolver: Arc::new(client_key_resolver),
        }
    }
}
