//! # Wallet REST API
//!
//! Builds the axum router for the node's HTTP interface. Every endpoint
//! shares the factory, the devnet ledger and the metrics handles through
//! axum's `State` extractor.
//!
//! Callers identify themselves with a `caller` field in the request body.
//! The node trusts that value as already authenticated.
//!
//! ## Endpoints
//!
//! | Method | Path                                          | Description                  |
//! |--------|-----------------------------------------------|------------------------------|
//! | GET    | `/health`                                     | Liveness probe               |
//! | GET    | `/status`                                     | Node status summary          |
//! | POST   | `/wallets`                                    | Deploy a wallet              |
//! | GET    | `/wallets`                                    | List wallet addresses        |
//! | GET    | `/wallets/:address`                           | Wallet snapshot              |
//! | POST   | `/wallets/:address/transactions`              | Propose a transfer           |
//! | GET    | `/wallets/:address/transactions/:id`          | Transfer by id               |
//! | POST   | `/wallets/:address/transactions/:id/approve`  | Approve a transfer           |
//! | POST   | `/wallets/:address/quorum-changes`            | Propose a quorum change      |
//! | GET    | `/wallets/:address/quorum-changes/:id`        | Quorum change by id          |
//! | POST   | `/wallets/:address/quorum-changes/:id/approve`| Approve a quorum change      |
//! | POST   | `/ledger/mint`                                | Devnet faucet                |
//! | GET    | `/ledger/:asset/:holder`                      | Balance lookup               |

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use multisig_contracts::{
    ApprovalOutcome, ApprovalPolicy, ErrorKind, LogKind, MultisigError, MultisigFactory, Payload,
    Transaction, TxId, TxStatus, WalletHandle, WalletSnapshot,
};
use multisig_protocol::{Amount, Identity, InMemoryLedger, Ledger};

use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// The node's reported version string.
    pub version: String,
    /// Deploys and indexes wallets. Write-locked only for creation.
    pub factory: Arc<RwLock<MultisigFactory>>,
    /// Devnet ledger every wallet holds its funds on.
    pub ledger: Arc<InMemoryLedger>,
    pub metrics: SharedMetrics,
}

impl AppState {
    /// Fresh state with an empty ledger and factory.
    pub fn new(version: String, metrics: SharedMetrics) -> Self {
        let ledger = Arc::new(InMemoryLedger::new());
        let factory = MultisigFactory::new(ledger.clone());
        Self {
            version,
            factory: Arc::new(RwLock::new(factory)),
            ledger,
            metrics,
        }
    }

    /// Resolves a wallet address from a path segment.
    async fn wallet(&self, address: &str) -> Result<WalletHandle, ApiError> {
        let address = parse_identity(address)?;
        self.factory
            .read()
            .await
            .wallet(&address)
            .ok_or_else(|| ApiError::NotFound(format!("wallet {address} not found")))
    }

    /// Counts a rejected call and passes the error through.
    fn reject(&self, err: impl Into<ApiError>) -> ApiError {
        let err = err.into();
        self.metrics.record_rejection(err.kind().as_str());
        err
    }
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/wallets", get(list_wallets_handler).post(create_wallet_handler))
        .route("/wallets/:address", get(wallet_handler))
        .route("/wallets/:address/transactions", post(propose_handler))
        .route("/wallets/:address/transactions/:id", get(transaction_handler))
        .route(
            "/wallets/:address/transactions/:id/approve",
            post(approve_handler),
        )
        .route(
            "/wallets/:address/quorum-changes",
            post(propose_quorum_change_handler),
        )
        .route(
            "/wallets/:address/quorum-changes/:id",
            get(quorum_change_handler),
        )
        .route(
            "/wallets/:address/quorum-changes/:id/approve",
            post(approve_quorum_change_handler),
        )
        .route("/ledger/mint", post(mint_handler))
        .route("/ledger/:asset/:holder", get(balance_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error body returned by every endpoint on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
}

/// Failure of an API call.
#[derive(Debug)]
pub enum ApiError {
    /// Refused by the wallet core.
    Wallet(MultisigError),
    /// Malformed input the core never saw (bad address, null mint target).
    BadRequest(String),
    /// Unknown wallet address.
    NotFound(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Wallet(err) => err.kind(),
            ApiError::BadRequest(_) => ErrorKind::InvalidArgument,
            ApiError::NotFound(_) => ErrorKind::NotFound,
        }
    }

    fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidConfig | ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::InsufficientFunds => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::LedgerFailure => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<MultisigError> for ApiError {
    fn from(err: MultisigError) -> Self {
        ApiError::Wallet(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();
        let error = match self {
            ApiError::Wallet(err) => err.to_string(),
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg,
        };
        tracing::debug!(%status, %kind, %error, "request rejected");
        (status, Json(ErrorResponse { error, kind })).into_response()
    }
}

fn parse_identity(raw: &str) -> Result<Identity, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::BadRequest(format!("invalid address {raw:?}: {e}")))
}

fn parse_tx_id(raw: &str) -> Result<TxId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid tx id {raw:?}")))
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Body for `POST /wallets`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateWalletRequest {
    pub quorum: usize,
    pub signers: Vec<Identity>,
    #[serde(default)]
    pub proposer_approves: bool,
}

/// Response payload for `GET /wallets`.
#[derive(Debug, Serialize, Deserialize)]
pub struct WalletListResponse {
    pub count: usize,
    /// Addresses in creation order.
    pub wallets: Vec<Identity>,
}

/// Body for `POST /wallets/:address/transactions`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProposeTransferRequest {
    pub caller: Identity,
    pub amount: Amount,
    pub recipient: Identity,
    pub asset: Identity,
}

/// Body for `POST /wallets/:address/quorum-changes`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProposeQuorumChangeRequest {
    pub caller: Identity,
    pub new_quorum: usize,
}

/// Body for both approve endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApproveRequest {
    pub caller: Identity,
}

/// Response payload for accepted proposals.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProposalResponse {
    pub wallet: Identity,
    pub kind: LogKind,
    pub id: TxId,
}

/// Response payload for a single log entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: TxId,
    pub proposer: Identity,
    pub payload: Payload,
    pub no_of_approvals: usize,
    pub approvals: Vec<Identity>,
    pub status: TxStatus,
    pub proposed_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Transaction> for TransactionResponse {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            proposer: tx.proposer,
            payload: tx.payload.clone(),
            no_of_approvals: tx.no_of_approvals(),
            approvals: tx.approvals().iter().copied().collect(),
            status: tx.status(),
            proposed_at: tx.proposed_at,
            completed_at: tx.completed_at,
        }
    }
}

/// Body for `POST /ledger/mint`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MintRequest {
    pub asset: Identity,
    pub to: Identity,
    pub amount: Amount,
}

/// Response payload for ledger balance queries.
#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub asset: Identity,
    pub holder: Identity,
    pub balance: Amount,
}

/// Response payload for `GET /status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub version: String,
    pub factory_id: Uuid,
    pub wallets: usize,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health`: 200 while the process is up.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// `GET /status`
async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let factory = state.factory.read().await;
    Json(StatusResponse {
        version: state.version.clone(),
        factory_id: factory.factory_id(),
        wallets: factory.wallet_count(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// `POST /wallets`: deploys a wallet and returns its snapshot.
async fn create_wallet_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateWalletRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let policy = ApprovalPolicy {
        proposer_approves: req.proposer_approves,
    };

    let mut factory = state.factory.write().await;
    let handle = factory
        .create_wallet_with_policy(req.quorum, req.signers, policy)
        .map_err(|e| state.reject(e))?;

    state.metrics.wallets_created_total.inc();
    state.metrics.wallets.set(factory.wallet_count() as i64);

    let snapshot = handle.read().snapshot();
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// `GET /wallets`
async fn list_wallets_handler(State(state): State<AppState>) -> impl IntoResponse {
    let wallets = state.factory.read().await.wallet_addresses();
    Json(WalletListResponse {
        count: wallets.len(),
        wallets,
    })
}

/// `GET /wallets/:address`
async fn wallet_handler(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WalletSnapshot>, ApiError> {
    let handle = state.wallet(&address).await?;
    let snapshot = handle.read().snapshot();
    Ok(Json(snapshot))
}

/// `POST /wallets/:address/transactions`
async fn propose_handler(
    Path(address): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<ProposeTransferRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handle = state.wallet(&address).await?;
    let id = handle
        .write()
        .propose(&req.caller, req.amount, req.recipient, req.asset)
        .map_err(|e| state.reject(e))?;

    state.metrics.proposals_total.inc();
    Ok((
        StatusCode::CREATED,
        Json(ProposalResponse {
            wallet: handle.address(),
            kind: LogKind::Transfer,
            id,
        }),
    ))
}

/// `GET /wallets/:address/transactions/:id`
async fn transaction_handler(
    Path((address, id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let id = parse_tx_id(&id)?;
    let handle = state.wallet(&address).await?;
    let wallet = handle.read();
    let tx = wallet.transaction(id)?;
    Ok(Json(TransactionResponse::from(tx)))
}

/// `POST /wallets/:address/transactions/:id/approve`
async fn approve_handler(
    Path((address, id)): Path<(String, String)>,
    State(state): State<AppState>,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<ApprovalOutcome>, ApiError> {
    let id = parse_tx_id(&id)?;
    let handle = state.wallet(&address).await?;
    let outcome = handle
        .write()
        .approve(&req.caller, id)
        .map_err(|e| state.reject(e))?;
    Ok(Json(record_approval(&state, outcome)))
}

/// `POST /wallets/:address/quorum-changes`
async fn propose_quorum_change_handler(
    Path(address): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<ProposeQuorumChangeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handle = state.wallet(&address).await?;
    let id = handle
        .write()
        .propose_quorum_change(&req.caller, req.new_quorum)
        .map_err(|e| state.reject(e))?;

    state.metrics.proposals_total.inc();
    Ok((
        StatusCode::CREATED,
        Json(ProposalResponse {
            wallet: handle.address(),
            kind: LogKind::QuorumChange,
            id,
        }),
    ))
}

/// `GET /wallets/:address/quorum-changes/:id`
async fn quorum_change_handler(
    Path((address, id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let id = parse_tx_id(&id)?;
    let handle = state.wallet(&address).await?;
    let wallet = handle.read();
    let entry = wallet.quorum_change(id)?;
    Ok(Json(TransactionResponse::from(entry)))
}

/// `POST /wallets/:address/quorum-changes/:id/approve`
async fn approve_quorum_change_handler(
    Path((address, id)): Path<(String, String)>,
    State(state): State<AppState>,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<ApprovalOutcome>, ApiError> {
    let id = parse_tx_id(&id)?;
    let handle = state.wallet(&address).await?;
    let outcome = handle
        .write()
        .approve_quorum_change(&req.caller, id)
        .map_err(|e| state.reject(e))?;
    Ok(Json(record_approval(&state, outcome)))
}

fn record_approval(state: &AppState, outcome: ApprovalOutcome) -> ApprovalOutcome {
    state.metrics.approvals_total.inc();
    if outcome.executed {
        state.metrics.executions_total.inc();
    }
    outcome
}

/// `POST /ledger/mint`: credits new units on the devnet ledger.
async fn mint_handler(
    State(state): State<AppState>,
    Json(req): Json<MintRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state
        .ledger
        .mint(&req.asset, &req.to, req.amount)
        .map_err(|e| state.reject(ApiError::BadRequest(e.to_string())))?;

    tracing::info!(asset = %req.asset, holder = %req.to, amount = req.amount, "devnet mint");
    Ok(Json(BalanceResponse {
        asset: req.asset,
        holder: req.to,
        balance,
    }))
}

/// `GET /ledger/:asset/:holder`
async fn balance_handler(
    Path((asset, holder)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let asset = parse_identity(&asset)?;
    let holder = parse_identity(&holder)?;
    Ok(Json(BalanceResponse {
        asset,
        holder,
        balance: state.ledger.balance_of(&holder, &asset),
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
