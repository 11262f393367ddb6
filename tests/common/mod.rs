#![allow(dead_code)]

//! In-process fake VMstore used by the integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use vmstore::session::{SessionConfig, VmStore};

pub const USER: &str = "admin";
pub const PASSWORD: &str = "secret!";
pub const TOKEN: &str = "fake-session-token";
const ERROR_TYPE_ID: &str = "com.tintri.api.rest.v310.dto.domain.beans.TintriError";

#[derive(Debug, Default)]
pub struct FakeState {
    pub vms: Vec<Value>,
    pub disks: Vec<Value>,
    pub qos_requests: Vec<Value>,
    pub logged_out: bool,
    pub omit_session_cookie: bool,
}

type AppState = State<Arc<Mutex<FakeState>>>;

pub struct FakeVmStore {
    pub addr: SocketAddr,
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeVmStore {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(FakeState {
            vms: vec![
                vm_json("vm-1", "web01", Some((100, 5000))),
                vm_json("vm-2", "web02", None),
                vm_json("vm-3", "db01", Some((0, 0))),
            ],
            disks: vec![
                json!({ "uuid": { "uuid": "disk-1" }, "name": "web01.vmdk", "vmUuid": { "uuid": "vm-1" } }),
                json!({ "uuid": { "uuid": "disk-2" }, "name": "web01_1.vmdk", "vmUuid": { "uuid": "vm-1" } }),
                json!({ "uuid": { "uuid": "disk-3" }, "name": "db01.vmdk", "vmUuid": { "uuid": "vm-3" } }),
            ],
            ..Default::default()
        }));

        let router = Router::new()
            .route("/api/v310/session/login", post(login))
            .route("/api/v310/session/logout", get(logout))
            .route("/api/v310/vm", get(list_vms))
            .route("/api/v310/vm/qosConfig", put(set_qos))
            .route("/api/v310/vm/{vm_id}", get(get_vm))
            .route("/api/v310/virtualDisk", get(list_disks))
            .route("/api/v310/datastore/{uuid}", get(get_datastore))
            .route("/api/v310/datastore/{uuid}/statsRealtime", get(get_perf))
            .route("/api/v310/appliance/{uuid}", get(get_appliance))
            .route("/api/v310/servicegroup", get(list_service_groups))
            .route("/api/v310/bogusUri", get(bogus))
            .route("/api/v310/notJson", get(not_json))
            .route("/api/v310/maintenance", get(maintenance))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        FakeVmStore { addr, state }
    }

    pub fn config(&self) -> SessionConfig {
        SessionConfig {
            device: self.addr.to_string(),
            scheme: "http".to_string(),
            ..Default::default()
        }
    }

    pub async fn login(&self) -> VmStore {
        VmStore::login(self.config(), USER, PASSWORD).await.unwrap()
    }
}

pub fn vm_json(uuid: &str, name: &str, qos: Option<(u64, u64)>) -> Value {
    let mut vm = json!({
        "typeId": "com.tintri.api.rest.v310.dto.domain.beans.vm.VirtualMachine",
        "uuid": { "uuid": uuid },
        "vmware": {
            "name": name,
            "vcenterName": "dev-vc1",
            "isPowered": true,
            "isTemplate": false,
            "hypervisorType": "VMWARE"
        }
    });
    if let Some((min, max)) = qos {
        vm["qosConfig"] = json!({
            "typeId": "com.tintri.api.rest.v310.dto.domain.beans.vm.VirtualMachineQoSConfig",
            "minNormalizedIops": min,
            "maxNormalizedIops": max
        });
    }
    vm
}

fn tintri_error(status: StatusCode, code: &str, message: &str) -> Response {
    let body = json!({ "typeId": ERROR_TYPE_ID, "code": code, "message": message });
    (status, Json(body)).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("JSESSIONID={}", TOKEN);
    headers.get(COOKIE).and_then(|v| v.to_str().ok()) == Some(expected.as_str())
}

fn unauthorized() -> Response {
    tintri_error(StatusCode::UNAUTHORIZED, "ERR-API-0005", "Not logged in")
}

async fn login(State(s): AppState, Json(body): Json<Value>) -> Response {
    if body["username"] == USER && body["password"] == PASSWORD {
        if s.lock().unwrap().omit_session_cookie {
            return Json(json!({ "typeId": "com.tintri.api.rest.vcommon.dto.rbac.RestApiSession" }))
                .into_response();
        }
        let cookie = format!("JSESSIONID={}; Path=/; HttpOnly", TOKEN);
        ([(SET_COOKIE, cookie)], Json(json!({ "typeId": "com.tintri.api.rest.vcommon.dto.rbac.RestApiSession" })))
            .into_response()
    } else {
        tintri_error(StatusCode::UNAUTHORIZED, "ERR-API-0100", "Invalid username or password")
    }
}

async fn logout(State(s): AppState, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    s.lock().unwrap().logged_out = true;
    StatusCode::NO_CONTENT.into_response()
}

async fn list_vms(
    State(s): AppState,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = s.lock().unwrap();
    let items: Vec<Value> = state
        .vms
        .iter()
        .filter(|vm| match params.get("name") {
            Some(name) => vm["vmware"]["name"]
                .as_str()
                .map(|n| n.contains(name.as_str()))
                .unwrap_or(false),
            None => true,
        })
        .cloned()
        .collect();
    Json(json!({
        "typeId": "com.tintri.api.rest.v310.dto.Page",
        "filteredTotal": items.len(),
        "absoluteTotal": state.vms.len(),
        "items": items,
    }))
    .into_response()
}

async fn get_vm(State(s): AppState, headers: HeaderMap, Path(vm_id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = s.lock().unwrap();
    match state.vms.iter().find(|vm| vm["uuid"]["uuid"] == vm_id.as_str()) {
        Some(vm) => Json(vm.clone()).into_response(),
        None => tintri_error(StatusCode::NOT_FOUND, "ERR-API-0104", "VM not found"),
    }
}

async fn set_qos(State(s): AppState, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = s.lock().unwrap();
    let new_value = body["newValue"].clone();
    let ids: Vec<String> = body["ids"]
        .as_array()
        .map(|ids| ids.iter().filter_map(|i| i.as_str().map(String::from)).collect())
        .unwrap_or_default();
    for vm in state.vms.iter_mut() {
        let matches = vm["uuid"]["uuid"]
            .as_str()
            .map(|u| ids.iter().any(|i| i == u))
            .unwrap_or(false);
        if matches {
            vm["qosConfig"] = new_value.clone();
        }
    }
    state.qos_requests.push(body);
    StatusCode::NO_CONTENT.into_response()
}

async fn list_disks(
    State(s): AppState,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = s.lock().unwrap();
    let disks: Vec<Value> = state
        .disks
        .iter()
        .filter(|d| match params.get("vmUuid") {
            Some(vm) => d["vmUuid"]["uuid"] == vm.as_str(),
            None => true,
        })
        .cloned()
        .collect();
    Json(Value::Array(disks)).into_response()
}

async fn get_datastore(headers: HeaderMap, Path(uuid): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "typeId": "com.tintri.api.rest.v310.dto.domain.Datastore",
        "uuid": { "uuid": uuid },
        "stat": {
            "spaceUsedGiB": 400.0,
            "spaceTotalGiB": 1600.0,
            "spaceUsedPhysicalGiB": 210.0,
            "spaceRemainingPhysicalGiB": 1390.0,
            "performanceReserveUsed": 35.0,
            "performanceReserveRemaining": 65.0,
            "flashHitPercent": 98.5
        },
        "storageContainers": []
    }))
    .into_response()
}

async fn get_perf(headers: HeaderMap, Path(uuid): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "typeId": "com.tintri.api.rest.v310.dto.domain.beans.datastore.DatastoreStat",
        "datastore": uuid,
        "operationsTotalIops": 1234,
        "latencyTotalMs": 0.8
    }))
    .into_response()
}

async fn get_appliance(headers: HeaderMap, Path(uuid): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([{
        "uuid": { "uuid": uuid },
        "disks": [
            { "locator": "slot-0", "status": "OK", "state": "DISK_STATE_ONLINE", "diskType": "SSD" },
            { "locator": "slot-1", "status": "OK", "state": "DISK_STATE_ONLINE", "diskType": "SSD" }
        ]
    }]))
    .into_response()
}

async fn list_service_groups(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "filteredTotal": 1,
        "items": [{ "uuid": { "uuid": "sg-1" }, "name": "gold", "memberCount": 3 }]
    }))
    .into_response()
}

// error payload wrapped in an array with a success status
async fn bogus() -> Response {
    Json(json!([{ "typeId": ERROR_TYPE_ID, "code": "ERR-API-0404", "message": "Unknown resource" }]))
        .into_response()
}

async fn not_json() -> Response {
    (StatusCode::BAD_GATEWAY, "<html>upstream down</html>").into_response()
}

// JSON body on a failure status, but not an error payload
async fn maintenance() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "state": "MAINTENANCE" }))).into_response()
}
