pub mod arguments;
pub mod deploy;
pub mod infra;
pub mod summary;

use {
    arguments::Arguments,
    clap::Parser,
    contracts::ContractFactory,
    deploy::{Deployer, Deployment, Error},
    std::{process::ExitCode, sync::Arc},
    summary::DeploymentSummary,
};

/// Entry point of the binary: parses the arguments, deploys and maps the
/// outcome to the process exit code.
pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = match parse(args) {
        Ok(args) => args,
        Err(code) => return code,
    };
    observe::tracing::initialize(&observe::Config::new(
        &args.logging.log_filter,
        args.logging.log_stderr_threshold,
        args.logging.use_json_logs,
    ));
    tracing::info!("running deployer with validated arguments:\n{}", args);

    report(&run(args).await)
}

/// Deploys the configured contract and returns the live deployment.
pub async fn run(args: Arguments) -> Result<Deployment, Error> {
    let factory = ContractFactory::load(&args.artifacts, &args.contract)?;
    let web3 = ethrpc::Web3::new(&args.ethrpc())?;
    let node = Arc::new(infra::Node::new(web3, args.confirmations, args.gas_limit));

    let deployment = Deployer::new(factory, node.clone(), node)
        .deploy()
        .await?;

    if let Some(path) = &args.deployment_file {
        DeploymentSummary::new(&args.contract, &deployment).write(path)?;
        tracing::info!(path = %path.display(), "wrote deployment summary");
    }
    Ok(deployment)
}

/// Help requests succeed, every other usage error fails the process with the
/// same code as a failed deployment.
fn parse(args: impl Iterator<Item = String>) -> Result<Arguments, ExitCode> {
    Arguments::try_parse_from(args).map_err(|err| {
        let _ = err.print();
        if err.use_stderr() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    })
}

fn report(outcome: &Result<Deployment, Error>) -> ExitCode {
    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            // The log filter may drop errors, the reason still has to reach
            // the operator.
            if !tracing::enabled!(tracing::Level::ERROR) {
                eprintln!("{err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address};

    fn args(args: &[&str]) -> impl Iterator<Item = String> {
        args.iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[tokio::test]
    async fn invalid_arguments_exit_with_failure() {
        let code = start(args(&["deployer", "--private-keys", "0xnotakey"])).await;

        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn help_exits_with_success() {
        assert_eq!(start(args(&["deployer", "--help"])).await, ExitCode::SUCCESS);
    }

    #[tokio::test]
    async fn missing_artifact_exits_with_failure() {
        let dir = tempfile::tempdir().unwrap();
        let arguments = parse(args(&[
            "deployer",
            "--artifacts",
            dir.path().join("missing").to_str().unwrap(),
        ]))
        .unwrap();

        let outcome = run(arguments).await;

        assert!(matches!(&outcome, Err(Error::Other(_))));
        assert_eq!(report(&outcome), ExitCode::FAILURE);
    }

    #[test]
    fn reverted_deployment_exits_with_failure() {
        let outcome = Err(Error::DeploymentFailed("RegistryNFT".to_string()));

        assert_eq!(report(&outcome), ExitCode::FAILURE);
    }

    #[test]
    fn deployment_exits_with_success() {
        let factory =
            ContractFactory::from_json("Answer", r#"{ "abi": [], "bytecode": "0x600a600c" }"#)
                .unwrap();
        let outcome = Ok(Deployment {
            accounts: vec![address!("0x0000000000000000000000000000000000000abc")],
            contract: factory.at(
                address!("0x0000000000000000000000000000000000000def"),
                ethrpc::dummy_provider(),
            ),
            transaction_hash: Default::default(),
        });

        assert_eq!(report(&outcome), ExitCode::SUCCESS);
    }
}
