//! Shared setup for the mediator integration tests.
//!
//! Both chains live in one `App`: a "home" mediator bridging native coins and
//! a "foreign" mediator minting a CW20 token, wired to each other through a
//! mock AMB transport. The mock records every submitted message and delivers
//! it when a test calls `ExecuteMessageCall`, recording failures the way the
//! real transport does.

#![allow(dead_code)]

use common::transport::{
    FailedMessageDataHashResponse, FailedMessageReceiverResponse, FailedMessageSenderResponse,
    MaxGasPerTxResponse, MessageCallStatusResponse, TransportDelivery, MESSAGE_ID_ATTRIBUTE,
};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    coins, from_json, to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Reply,
    Response, StdError, StdResult, SubMsg, SubMsgResult, Uint128,
};
use cw20::{BalanceResponse, Cw20QueryMsg, MinterResponse};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use cw_storage_plus::{Item, Map};

use mediator::hash::bytes32_to_hex;
use mediator::keccak256;
use mediator::limits::Limits;
use mediator::msg::{DayCountersResponse, ExecuteMsg, FeeManagerMsg, InstantiateMsg, QueryMsg};
use mediator::state::AssetMode;

pub const DENOM: &str = "uluna";
/// One whole token (18 decimals)
pub const ONE: u128 = 1_000_000_000_000_000_000;
pub const AMB_MAX_GAS: u64 = 2_000_000;
pub const REQUEST_GAS: u64 = 1_000_000;

// ============================================================================
// Mock AMB Transport
// ============================================================================

#[cw_serde]
pub struct MockAmbInstantiateMsg {
    pub max_gas_per_tx: u64,
}

#[cw_serde]
pub enum MockAmbExecuteMsg {
    /// Same shape as `TransportExecuteMsg::RequireToPassMessage`
    RequireToPassMessage {
        contract: String,
        data: Binary,
        gas: u64,
    },
    /// Deliver a recorded message to its destination
    ExecuteMessageCall { message_id: String },
    /// Deliver an arbitrary payload as if it came from `sender`
    ExecuteForeignCall {
        contract: String,
        sender: String,
        data: Binary,
        message_id: String,
    },
}

#[cw_serde]
pub enum MockAmbQueryMsg {
    MaxGasPerTx {},
    MessageCallStatus { message_id: String },
    FailedMessageDataHash { message_id: String },
    FailedMessageReceiver { message_id: String },
    FailedMessageSender { message_id: String },
    PassedMessage { message_id: String },
    LastMessageId {},
}

#[cw_serde]
pub struct PassedMessage {
    pub sender: Addr,
    pub contract: String,
    pub data: Binary,
    pub gas: u64,
}

#[cw_serde]
struct PendingCall {
    message_id: String,
    contract: String,
    sender: String,
    data: Binary,
}

#[cw_serde]
struct FailedCall {
    data_hash: String,
    receiver: String,
    sender: String,
}

const MAX_GAS: Item<u64> = Item::new("max_gas");
const MESSAGE_COUNT: Item<u64> = Item::new("message_count");
const PASSED: Map<&str, PassedMessage> = Map::new("passed");
const PENDING_CALL: Item<PendingCall> = Item::new("pending_call");
const CALL_STATUS: Map<&str, bool> = Map::new("call_status");
const FAILED: Map<&str, FailedCall> = Map::new("failed");

const DELIVERY_REPLY_ID: u64 = 7;

fn amb_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: MockAmbInstantiateMsg,
) -> StdResult<Response> {
    MAX_GAS.save(deps.storage, &msg.max_gas_per_tx)?;
    MESSAGE_COUNT.save(deps.storage, &0)?;
    Ok(Response::new())
}

fn amb_execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: MockAmbExecuteMsg,
) -> StdResult<Response> {
    match msg {
        MockAmbExecuteMsg::RequireToPassMessage {
            contract,
            data,
            gas,
        } => {
            if gas > MAX_GAS.load(deps.storage)? {
                return Err(StdError::generic_err("gas above max_gas_per_tx"));
            }
            let count = MESSAGE_COUNT.load(deps.storage)? + 1;
            MESSAGE_COUNT.save(deps.storage, &count)?;
            let message_id = bytes32_to_hex(&keccak256(&count.to_be_bytes()));
            PASSED.save(
                deps.storage,
                &message_id,
                &PassedMessage {
                    sender: info.sender,
                    contract,
                    data,
                    gas,
                },
            )?;
            Ok(Response::new()
                .add_attribute("action", "require_to_pass_message")
                .add_attribute(MESSAGE_ID_ATTRIBUTE, message_id))
        }
        MockAmbExecuteMsg::ExecuteMessageCall { message_id } => {
            let passed = PASSED.load(deps.storage, &message_id)?;
            deliver(
                deps,
                PendingCall {
                    message_id,
                    contract: passed.contract,
                    sender: passed.sender.to_string(),
                    data: passed.data,
                },
            )
        }
        MockAmbExecuteMsg::ExecuteForeignCall {
            contract,
            sender,
            data,
            message_id,
        } => deliver(
            deps,
            PendingCall {
                message_id,
                contract,
                sender,
                data,
            },
        ),
    }
}

fn deliver(deps: DepsMut, call: PendingCall) -> StdResult<Response> {
    let msg = TransportDelivery {
        message_id: call.message_id.clone(),
        sender: call.sender.clone(),
        data: call.data.clone(),
    }
    .into_cosmos_msg::<_, Empty>(call.contract.clone())?;
    PENDING_CALL.save(deps.storage, &call)?;
    Ok(Response::new().add_submessage(SubMsg::reply_always(msg, DELIVERY_REPLY_ID)))
}

fn amb_reply(deps: DepsMut, _env: Env, msg: Reply) -> StdResult<Response> {
    let call = PENDING_CALL.load(deps.storage)?;
    PENDING_CALL.remove(deps.storage);
    let status = matches!(msg.result, SubMsgResult::Ok(_));
    CALL_STATUS.save(deps.storage, &call.message_id, &status)?;
    if !status {
        FAILED.save(
            deps.storage,
            &call.message_id,
            &FailedCall {
                data_hash: bytes32_to_hex(&keccak256(call.data.as_slice())),
                receiver: call.contract,
                sender: call.sender,
            },
        )?;
    }
    Ok(Response::new().add_attribute("status", status.to_string()))
}

fn amb_query(deps: Deps, _env: Env, msg: MockAmbQueryMsg) -> StdResult<Binary> {
    match msg {
        MockAmbQueryMsg::MaxGasPerTx {} => to_json_binary(&MaxGasPerTxResponse {
            max_gas_per_tx: MAX_GAS.load(deps.storage)?,
        }),
        MockAmbQueryMsg::MessageCallStatus { message_id } => {
            to_json_binary(&MessageCallStatusResponse {
                status: CALL_STATUS
                    .may_load(deps.storage, &message_id)?
                    .unwrap_or(false),
            })
        }
        MockAmbQueryMsg::FailedMessageDataHash { message_id } => {
            to_json_binary(&FailedMessageDataHashResponse {
                data_hash: failed(deps, &message_id)?.data_hash,
            })
        }
        MockAmbQueryMsg::FailedMessageReceiver { message_id } => {
            to_json_binary(&FailedMessageReceiverResponse {
                receiver: failed(deps, &message_id)?.receiver,
            })
        }
        MockAmbQueryMsg::FailedMessageSender { message_id } => {
            to_json_binary(&FailedMessageSenderResponse {
                sender: failed(deps, &message_id)?.sender,
            })
        }
        MockAmbQueryMsg::PassedMessage { message_id } => {
            to_json_binary(&PASSED.load(deps.storage, &message_id)?)
        }
        MockAmbQueryMsg::LastMessageId {} => {
            let count = MESSAGE_COUNT.load(deps.storage)?;
            to_json_binary(&bytes32_to_hex(&keccak256(&count.to_be_bytes())))
        }
    }
}

// Unknown ids report an empty failure, like an unset mapping.
fn failed(deps: Deps, message_id: &str) -> StdResult<FailedCall> {
    Ok(FAILED
        .may_load(deps.storage, message_id)?
        .unwrap_or(FailedCall {
            data_hash: bytes32_to_hex(&[0u8; 32]),
            receiver: String::new(),
            sender: String::new(),
        }))
}

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_amb() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract =
        ContractWrapper::new(amb_execute, amb_instantiate, amb_query).with_reply(amb_reply);
    Box::new(contract)
}

pub fn contract_mediator() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        mediator::contract::execute,
        mediator::contract::instantiate,
        mediator::contract::query,
    )
    .with_reply(mediator::contract::reply)
    .with_migrate(mediator::contract::migrate);
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

// ============================================================================
// Test Setup
// ============================================================================

/// Limits used by most tests: daily 2, max 1, min 0.01 (both directions)
pub fn default_limits() -> Limits {
    Limits {
        daily_limit: Uint128::new(2 * ONE),
        max_per_tx: Uint128::new(ONE),
        min_per_tx: Uint128::new(ONE / 100),
        execution_daily_limit: Uint128::new(2 * ONE),
        execution_max_per_tx: Uint128::new(ONE),
        request_gas_limit: REQUEST_GAS,
        decimal_shift: 0,
    }
}

pub struct Suite {
    pub app: App,
    pub owner: Addr,
    pub user: Addr,
    pub amb: Addr,
    pub mediator_code_id: u64,
    /// Native-coin mediator
    pub home: Addr,
    /// CW20 mint mediator
    pub foreign: Addr,
    /// Token minted by `foreign`
    pub token: Addr,
}

pub fn setup() -> Suite {
    setup_with(default_limits(), default_limits(), None)
}

/// Build the suite, optionally with a fee manager on the foreign mediator.
pub fn setup_with(
    home_limits: Limits,
    foreign_limits: Limits,
    foreign_fee_manager: Option<FeeManagerMsg>,
) -> Suite {
    let mut app = App::default();

    let owner = Addr::unchecked("terra1owner");
    let user = Addr::unchecked("terra1user");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &owner, coins(100 * ONE, DENOM))
            .unwrap();
        router
            .bank
            .init_balance(storage, &user, coins(100 * ONE, DENOM))
            .unwrap();
    });

    let amb_code_id = app.store_code(contract_amb());
    let amb = app
        .instantiate_contract(
            amb_code_id,
            owner.clone(),
            &MockAmbInstantiateMsg {
                max_gas_per_tx: AMB_MAX_GAS,
            },
            &[],
            "amb",
            None,
        )
        .unwrap();

    let mediator_code_id = app.store_code(contract_mediator());
    let home = instantiate_mediator(
        &mut app,
        mediator_code_id,
        &owner,
        &amb,
        AssetMode::Native {
            denom: DENOM.to_string(),
        },
        home_limits,
        None,
    );

    // The token's minter must be the foreign mediator, which needs the token
    // address first: predict the mediator address from instantiation order.
    let cw20_code_id = app.store_code(contract_cw20());
    let foreign_addr = Addr::unchecked("contract3");
    let token = app
        .instantiate_contract(
            cw20_code_id,
            owner.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Bridged Token".to_string(),
                symbol: "BRDG".to_string(),
                decimals: 18,
                initial_balances: vec![],
                mint: Some(MinterResponse {
                    minter: foreign_addr.to_string(),
                    cap: None,
                }),
                marketing: None,
            },
            &[],
            "bridged-token",
            None,
        )
        .unwrap();

    let foreign = instantiate_mediator(
        &mut app,
        mediator_code_id,
        &owner,
        &amb,
        AssetMode::Cw20Mint {
            token: token.clone(),
        },
        foreign_limits,
        foreign_fee_manager,
    );
    assert_eq!(foreign, foreign_addr);

    for (mediator, counterpart) in [(&home, &foreign), (&foreign, &home)] {
        app.execute_contract(
            owner.clone(),
            mediator.clone(),
            &ExecuteMsg::SetCounterpart {
                counterpart: counterpart.to_string(),
            },
            &[],
        )
        .unwrap();
    }

    Suite {
        app,
        owner,
        user,
        amb,
        mediator_code_id,
        home,
        foreign,
        token,
    }
}

pub fn instantiate_mediator(
    app: &mut App,
    code_id: u64,
    owner: &Addr,
    amb: &Addr,
    asset: AssetMode,
    limits: Limits,
    fee_manager: Option<FeeManagerMsg>,
) -> Addr {
    app.instantiate_contract(
        code_id,
        owner.clone(),
        &InstantiateMsg {
            owner: owner.to_string(),
            transport: amb.to_string(),
            counterpart: None,
            asset,
            limits,
            fee_manager,
        },
        &[],
        "mediator",
        Some(owner.to_string()),
    )
    .unwrap()
}

// ============================================================================
// Helpers
// ============================================================================

impl Suite {
    /// Relay native coins from `sender` through the home mediator.
    pub fn relay_native(
        &mut self,
        sender: &Addr,
        recipient: &str,
        amount: u128,
    ) -> Result<AppResponse, String> {
        self.app
            .execute_contract(
                sender.clone(),
                self.home.clone(),
                &ExecuteMsg::RelayTokens {
                    recipient: recipient.to_string(),
                },
                &coins(amount, DENOM),
            )
            .map_err(|e| e.root_cause().to_string())
    }

    /// Relay CW20 tokens from `sender` through `mediator` with a CW20 send.
    pub fn relay_cw20(
        &mut self,
        token: &Addr,
        mediator: &Addr,
        sender: &Addr,
        recipient: &str,
        amount: u128,
    ) -> Result<AppResponse, String> {
        self.app
            .execute_contract(
                sender.clone(),
                token.clone(),
                &cw20::Cw20ExecuteMsg::Send {
                    contract: mediator.to_string(),
                    amount: Uint128::new(amount),
                    msg: to_json_binary(&mediator::msg::ReceiveMsg::RelayTokens {
                        recipient: recipient.to_string(),
                    })
                    .unwrap(),
                },
                &[],
            )
            .map_err(|e| e.root_cause().to_string())
    }

    /// Execute `msg` on `contract` as `sender`, returning the root cause on
    /// failure.
    pub fn exec(
        &mut self,
        sender: &Addr,
        contract: &Addr,
        msg: &ExecuteMsg,
    ) -> Result<AppResponse, String> {
        self.app
            .execute_contract(sender.clone(), contract.clone(), msg, &[])
            .map_err(|e| e.root_cause().to_string())
    }

    /// Id of the most recent message submitted to the transport.
    pub fn last_message_id(&self) -> String {
        self.app
            .wrap()
            .query_wasm_smart(&self.amb, &MockAmbQueryMsg::LastMessageId {})
            .unwrap()
    }

    pub fn passed_message(&self, message_id: &str) -> PassedMessage {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.amb,
                &MockAmbQueryMsg::PassedMessage {
                    message_id: message_id.to_string(),
                },
            )
            .unwrap()
    }

    /// Have the transport deliver a recorded message. The call itself
    /// succeeds even when the destination fails.
    pub fn deliver(&mut self, message_id: &str) -> AppResponse {
        self.app
            .execute_contract(
                Addr::unchecked("terra1validator"),
                self.amb.clone(),
                &MockAmbExecuteMsg::ExecuteMessageCall {
                    message_id: message_id.to_string(),
                },
                &[],
            )
            .unwrap()
    }

    /// Deliver `data` to `contract` as if `sender` had submitted it.
    pub fn deliver_foreign(
        &mut self,
        contract: &Addr,
        sender: &str,
        data: Binary,
        message_id: &str,
    ) -> AppResponse {
        self.app
            .execute_contract(
                Addr::unchecked("terra1validator"),
                self.amb.clone(),
                &MockAmbExecuteMsg::ExecuteForeignCall {
                    contract: contract.to_string(),
                    sender: sender.to_string(),
                    data,
                    message_id: message_id.to_string(),
                },
                &[],
            )
            .unwrap()
    }

    pub fn message_call_status(&self, message_id: &str) -> bool {
        let res: MessageCallStatusResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.amb,
                &MockAmbQueryMsg::MessageCallStatus {
                    message_id: message_id.to_string(),
                },
            )
            .unwrap();
        res.status
    }

    pub fn bank_balance(&self, addr: &Addr) -> u128 {
        self.app
            .wrap()
            .query_balance(addr, DENOM)
            .unwrap()
            .amount
            .u128()
    }

    pub fn cw20_balance(&self, token: &Addr, addr: &Addr) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: addr.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    pub fn tracked_balance(&self, mediator: &Addr) -> u128 {
        let res: mediator::msg::MediatorBalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(mediator, &QueryMsg::MediatorBalance {})
            .unwrap();
        res.tracked.u128()
    }

    pub fn today(&self, mediator: &Addr) -> DayCountersResponse {
        let day: mediator::msg::CurrentDayResponse = self
            .app
            .wrap()
            .query_wasm_smart(mediator, &QueryMsg::CurrentDay {})
            .unwrap();
        self.app
            .wrap()
            .query_wasm_smart(mediator, &QueryMsg::DayCounters { day: day.day })
            .unwrap()
    }

    pub fn next_day(&mut self) {
        self.app
            .update_block(|block| block.time = block.time.plus_seconds(86_400));
    }
}

/// Decode a payload recorded by the transport.
pub fn decode_payload(data: &Binary) -> mediator::msg::MediatorMsg {
    from_json(data).unwrap()
}
