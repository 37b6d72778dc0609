use reqwest::blocking::{Request, Response};

pub trait HttpClient: Send + Sync {
    fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
