#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const OUTPUTS: [u8; 2] = [1, 2];
pub const TASKS: [u8; 4] = [1, 2, 3, 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Healthy,
    // HTTP 500 on everything
    Failing,
    // 200, but no `data` member
    Hollow,
}

/// In-memory stand-in for the device controller.
pub struct FakeDevice {
    pub mode: Mutex<Mode>,
    pub hits: Mutex<HashMap<String, usize>>,
    pub total: AtomicUsize,
    pub state: Mutex<HashMap<u8, bool>>,
    pub save: Mutex<HashMap<u8, bool>>,
    pub calendar: Mutex<Value>,
    pub posted: Mutex<Vec<(String, Value)>>,
}

impl FakeDevice {
    fn new() -> Self {
        let unset = json!({
            "allumage": {"heure": 255, "minute": 255, "seconde": 255},
            "extinction": {"heure": 255, "minute": 255, "seconde": 255},
        });
        let mut calendar = serde_json::Map::new();
        for n in OUTPUTS {
            let tasks: serde_json::Map<String, Value> = TASKS
                .iter()
                .map(|t| (format!("tache{}", t), unset.clone()))
                .collect();
            calendar.insert(format!("sortie{}", n), Value::Object(tasks));
        }

        FakeDevice {
            mode: Mutex::new(Mode::Healthy),
            hits: Mutex::new(HashMap::new()),
            total: AtomicUsize::new(0),
            state: Mutex::new(OUTPUTS.iter().map(|&n| (n, false)).collect()),
            save: Mutex::new(OUTPUTS.iter().map(|&n| (n, false)).collect()),
            calendar: Mutex::new(Value::Object(calendar)),
            posted: Mutex::new(Vec::new()),
        }
    }

    pub fn set_mode(&self, mode: Mode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn reset_hits(&self) {
        self.hits.lock().unwrap().clear();
        self.total.store(0, Ordering::SeqCst);
    }

    fn answer(&self, path: &str, data: impl FnOnce() -> Value) -> Result<Json<Value>, StatusCode> {
        *self.hits.lock().unwrap().entry(path.to_owned()).or_default() += 1;
        self.total.fetch_add(1, Ordering::SeqCst);
        match *self.mode.lock().unwrap() {
            Mode::Healthy => Ok(Json(json!({ "data": data() }))),
            Mode::Failing => Err(StatusCode::INTERNAL_SERVER_ERROR),
            Mode::Hollow => Ok(Json(json!({ "ok": true }))),
        }
    }

    fn record(&self, path: &str, body: &Value) {
        self.posted
            .lock()
            .unwrap()
            .push((path.to_owned(), body.clone()));
    }
}

type Dev = State<Arc<FakeDevice>>;

fn router() -> Router<Arc<FakeDevice>> {
    let mut router = Router::new()
        .route(
            "/getTime",
            get(|State(dev): Dev| async move {
                dev.answer("/getTime", || json!({"heure": 9, "minute": 5, "seconde": 7}))
            }),
        )
        .route(
            "/getDate",
            get(|State(dev): Dev| async move {
                dev.answer("/getDate", || json!({"annee": 2024, "mois": 3, "jour": 14}))
            }),
        )
        .route(
            "/getWifiStatus",
            get(|State(dev): Dev| async move {
                dev.answer("/getWifiStatus", || json!({"isConnected": true}))
            }),
        )
        .route(
            "/getCalendarConfigs",
            get(|State(dev): Dev| async move {
                let calendar = dev.calendar.lock().unwrap().clone();
                dev.answer("/getCalendarConfigs", || calendar)
            }),
        )
        .route(
            "/setInfos-wifi",
            post(|State(dev): Dev, Json(body): Json<Value>| async move {
                dev.record("/setInfos-wifi", &body);
                dev.answer("/setInfos-wifi", || body)
            }),
        )
        .route(
            "/setTime",
            post(|State(dev): Dev, Json(body): Json<Value>| async move {
                dev.record("/setTime", &body);
                dev.answer("/setTime", || body)
            }),
        );

    for n in OUTPUTS {
        let path = format!("/sortie-{}/getState", n);
        router = router.route(
            &path.clone(),
            get(move |State(dev): Dev| async move {
                let state = dev.state.lock().unwrap()[&n];
                dev.answer(&path, || json!({ "state": state }))
            }),
        );

        let path = format!("/sortie-{}/setState", n);
        router = router.route(
            &path.clone(),
            post(move |State(dev): Dev, Json(body): Json<Value>| async move {
                dev.record(&path, &body);
                let wanted = body["state"].as_bool();
                if *dev.mode.lock().unwrap() == Mode::Healthy {
                    if let Some(wanted) = wanted {
                        dev.state.lock().unwrap().insert(n, wanted);
                    }
                }
                dev.answer(&path, || json!({ "state": wanted }))
            }),
        );

        let path = format!("/getSaveState/sortie-{}", n);
        router = router.route(
            &path.clone(),
            get(move |State(dev): Dev| async move {
                let save = dev.save.lock().unwrap()[&n];
                dev.answer(&path, || json!({ "save": save }))
            }),
        );

        let path = format!("/save/sortie-{}", n);
        router = router.route(
            &path.clone(),
            post(move |State(dev): Dev, Json(body): Json<Value>| async move {
                dev.record(&path, &body);
                let wanted = body["save"].as_bool();
                if *dev.mode.lock().unwrap() == Mode::Healthy {
                    if let Some(wanted) = wanted {
                        dev.save.lock().unwrap().insert(n, wanted);
                    }
                }
                dev.answer(&path, || json!({ "save": wanted }))
            }),
        );

        for t in TASKS {
            let path = format!("/sortie-{}/tache-{}", n, t);
            router = router.route(
                &path.clone(),
                post(move |State(dev): Dev, Json(body): Json<Value>| async move {
                    dev.record(&path, &body);
                    if *dev.mode.lock().unwrap() == Mode::Healthy {
                        dev.calendar.lock().unwrap()[format!("sortie{}", n)]
                            [format!("tache{}", t)] = body.clone();
                    }
                    dev.answer(&path, || body)
                }),
            );
        }
    }

    router
}

/// Serves a fresh fake device on an ephemeral port and returns a client for it.
pub async fn spawn() -> (Arc<FakeDevice>, espctl::Client) {
    let device = Arc::new(FakeDevice::new());
    let app = router().with_state(device.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = espctl::Client::new(format!("http://{}", addr)).unwrap();
    (device, client)
}
