use lazy_static::lazy_static;
use reqwest::{Client, ClientBuilder};

lazy_static! {
    static ref USER_AGENT: String = format!("vizdiff-cli/{}", crate::VERSION);

    // Single attempt client, uploads are never retried
    pub static ref REQUEST_CLIENT: Client = ClientBuilder::new()
        .user_agent(USER_AGENT.as_str())
        .build()
        .unwrap();
}
