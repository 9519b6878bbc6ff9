use manoga_core_contact_impl::ContactFeatureServiceImpl;
use manoga_email_impl::EmailServiceImpl;
use manoga_shared_impl::{spam::SpamServiceImpl, time::TimeServiceImpl};

pub type RestServer = manoga_api_rest::RestServer<ContactFeature>;

pub type Email = EmailServiceImpl;

pub type Time = TimeServiceImpl;
pub type Spam = SpamServiceImpl<Time>;

pub type ContactFeature = ContactFeatureServiceImpl<Spam, Email>;
