//! Deploys a tiny fixture contract whose runtime code answers every call
//! with 42. Needs an anvil (or hardhat) node listening at `NODE_URL`.

use {
    alloy::{dyn_abi::DynSolValue, primitives::U256},
    clap::Parser,
    deployer::{arguments::Arguments, deploy::Error, summary::DeploymentSummary},
    ethrpc::wallet::ANVIL_MNEMONIC,
};

fn arguments(contract: &str, extra: &[&str]) -> Arguments {
    let node_url =
        std::env::var("NODE_URL").unwrap_or_else(|_| "http://localhost:8545".to_string());
    let artifacts = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/artifacts");
    let mut args = vec![
        "deployer",
        "--node-url",
        node_url.as_str(),
        "--artifacts",
        artifacts,
        "--contract",
        contract,
        "--mnemonic",
        ANVIL_MNEMONIC,
        "--mnemonic-accounts",
        "2",
    ];
    args.extend_from_slice(extra);
    Arguments::parse_from(args)
}

#[tokio::test]
#[ignore]
async fn local_node_deploy() {
    observe::tracing::initialize_reentrant(&observe::Config::default().with_env_filter("debug"));
    let dir = tempfile::tempdir().unwrap();
    let summary_path = dir.path().join("deployment.json");

    let deployment = deployer::run(arguments(
        "Answer",
        &["--deployment-file", summary_path.to_str().unwrap()],
    ))
    .await
    .unwrap();

    assert_eq!(deployment.accounts.len(), 2);
    let answer = deployment
        .contract
        .function("answer", &[])
        .unwrap()
        .call()
        .await
        .unwrap();
    assert_eq!(answer, vec![DynSolValue::Uint(U256::from(42), 256)]);

    let summary: DeploymentSummary =
        serde_json::from_str(&std::fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(summary.address, *deployment.contract.address());
    assert_eq!(summary.deployer, deployment.accounts[0]);
}

#[tokio::test]
#[ignore]
async fn local_node_missing_artifact() {
    let err = deployer::run(arguments("DoesNotExist", &[])).await.unwrap_err();

    assert!(matches!(err, Error::Other(_)));
}

#[tokio::test]
#[ignore]
async fn local_node_reverting_constructor() {
    // A fixed gas limit skips estimation, which would already reject the
    // transaction, so the revert happens on chain.
    let err = deployer::run(arguments("Reverting", &["--gas-limit", "100000"]))
        .await
        .unwrap_err();

    assert!(matches!(&err, Error::DeploymentFailed(name) if name == "Reverting"));
}
