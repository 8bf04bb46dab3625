//! Shared fixtures for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request},
};
use chrono::Utc;
use http_body_util::BodyExt;

use academy_hex::{MentorService, PaymentService, SignupService, inbound::HttpServer};
use academy_types::{
    GatewayError, Mentor, MentorId, MentorRepository, NewMentor, NotifyError, Order,
    OrderRequest, PaymentGateway, PhoneNumber, RepoError, Secret, SmsNotifier,
};

pub const SECRET: &str = "s3cr3t";

/// Provider stand-in; the recorded requests stay observable after the
/// gateway has been moved into the server.
#[derive(Clone, Default)]
pub struct StubGateway {
    pub requests: Arc<Mutex<Vec<OrderRequest>>>,
    pub fail: bool,
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_order(&self, req: OrderRequest) -> Result<Order, GatewayError> {
        self.requests.lock().unwrap().push(req.clone());
        if self.fail {
            return Err(GatewayError::Transport("connection reset by peer".into()));
        }

        let mut extra = serde_json::Map::new();
        extra.insert("entity".into(), "order".into());
        extra.insert("amount_paid".into(), 0.into());
        extra.insert("status".into(), "created".into());
        Ok(Order {
            id: "order_stub_1".into(),
            amount: req.amount,
            currency: req.currency.to_string(),
            receipt: Some(req.receipt.to_string()),
            extra,
        })
    }
}

#[derive(Default)]
pub struct StubMentors {
    pub mentors: Mutex<Vec<Mentor>>,
    pub fail: bool,
}

#[async_trait]
impl MentorRepository for StubMentors {
    async fn list_mentors(&self) -> Result<Vec<Mentor>, RepoError> {
        if self.fail {
            return Err(RepoError::Database("pool timed out".into()));
        }
        Ok(self.mentors.lock().unwrap().clone())
    }

    async fn insert_mentor(&self, mentor: NewMentor) -> Result<Mentor, RepoError> {
        let mentor = mentor.into_mentor(MentorId::new(), Utc::now());
        self.mentors.lock().unwrap().push(mentor.clone());
        Ok(mentor)
    }

    async fn count_mentors(&self) -> Result<i64, RepoError> {
        Ok(self.mentors.lock().unwrap().len() as i64)
    }
}

#[derive(Clone, Default)]
pub struct StubSms {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
}

#[async_trait]
impl SmsNotifier for StubSms {
    async fn send(&self, to: &PhoneNumber, message: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Rejected {
                status: 412,
                message: "Invalid Authentication".into(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), message.to_string()));
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub gateway: StubGateway,
    pub sms: StubSms,
}

pub struct TestAppBuilder {
    gateway: StubGateway,
    mentors: StubMentors,
    sms: StubSms,
    requests_per_minute: u32,
    trust_proxy: bool,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            gateway: StubGateway::default(),
            mentors: StubMentors::default(),
            sms: StubSms::default(),
            requests_per_minute: 1_000,
            trust_proxy: false,
        }
    }

    pub fn failing_gateway(mut self) -> Self {
        self.gateway.fail = true;
        self
    }

    pub fn failing_mentors(mut self) -> Self {
        self.mentors.fail = true;
        self
    }

    pub fn failing_sms(mut self) -> Self {
        self.sms.fail = true;
        self
    }

    pub fn mentors(self, mentors: Vec<NewMentor>) -> Self {
        {
            let mut stored = self.mentors.mentors.lock().unwrap();
            for mentor in mentors {
                stored.push(mentor.into_mentor(MentorId::new(), Utc::now()));
            }
        }
        self
    }

    pub fn rate_limit(mut self, requests_per_minute: u32) -> Self {
        self.requests_per_minute = requests_per_minute;
        self
    }

    pub fn trust_proxy(mut self) -> Self {
        self.trust_proxy = true;
        self
    }

    pub fn build(self) -> TestApp {
        let server = HttpServer::new(
            PaymentService::new(self.gateway.clone(), Secret::new(SECRET)),
            MentorService::new(self.mentors),
            SignupService::new(self.sms.clone(), "Shreyas Academy"),
        )
        .with_rate_limit(self.requests_per_minute)
        .with_trusted_proxy(self.trust_proxy);

        TestApp {
            router: server.router(),
            gateway: self.gateway,
            sms: self.sms,
        }
    }
}

pub fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
