use std::{net::SocketAddr, sync::Arc};

use manoga_api_rest::RestServerConfig;
use manoga_config::Config;
use manoga_core_contact_impl::ContactFeatureConfig;
use manoga_shared_impl::spam::SpamServiceConfig;
use types::{ContactFeature, Email, RestServer, Spam, Time};

pub mod types;

/// Wire up the rest server and all services it depends on
pub fn rest_server(config: &Config, email: Option<Email>) -> RestServer {
    let rest_server_config = RestServerConfig {
        addr: SocketAddr::new(config.http.host, config.http.port),
    };

    let spam_service_config = SpamServiceConfig {
        min_fill_time: config.spam.min_fill_time.into(),
    };

    let contact_feature_config = ContactFeatureConfig {
        sender: Arc::new(config.contact.sender.clone()),
        recipient: Arc::new(config.contact.recipient.clone()),
    };

    let spam = Spam::new(Time::default(), spam_service_config);
    let contact = ContactFeature::new(spam, email, contact_feature_config);

    RestServer::new(rest_server_config, contact)
}
