//! CLI tool for deploying and interacting with the credit line contracts.

use creditline_contracts::lending::collateral_ledger::CollateralLedger;
use creditline_contracts::lending::config::ProtocolConfig;
use creditline_contracts::lending::identity::CreditIdentity;
use creditline_contracts::lending::lending_pool::LendingPool;
use creditline_contracts::lending::loan_ledger::LoanLedger;
use creditline_contracts::lending::price_oracle::PriceOracle;
use creditline_contracts::lending::revenue_treasury::RevenueTreasury;
use creditline_contracts::lending::score_oracle::ScoreOracle;
use creditline_contracts::token::AssetToken;
use odra::casper_types::U256;
use odra::host::HostEnv;
use odra::prelude::{Address, Addressable};
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Deploys the principal asset token, the oracles and the registries.
pub struct CollaboratorsDeployScript;

impl DeployScript for CollaboratorsDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer,
    ) -> Result<(), odra_cli::deploy::Error> {
        use creditline_contracts::token::AssetTokenInitArgs;
        use odra::host::NoArgs;

        let _usdc = AssetToken::load_or_deploy(
            &env,
            AssetTokenInitArgs {
                name: String::from("Test USDC"),
                symbol: String::from("USDC"),
                decimals: 6,
            },
            container,
            300_000_000_000,
        )?;
        let _price_oracle = PriceOracle::load_or_deploy(&env, NoArgs, container, 300_000_000_000)?;
        let _score_oracle = ScoreOracle::load_or_deploy(&env, NoArgs, container, 300_000_000_000)?;
        let _identity = CreditIdentity::load_or_deploy(&env, NoArgs, container, 300_000_000_000)?;
        let _config = ProtocolConfig::load_or_deploy(&env, NoArgs, container, 300_000_000_000)?;

        Ok(())
    }
}

/// Deploys the core quartet and wires the contracts together.
/// Requires the collaborators to be deployed first.
pub struct CoreDeployScript;

impl DeployScript for CoreDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer,
    ) -> Result<(), odra_cli::deploy::Error> {
        use creditline_contracts::lending::lending_pool::LendingPoolInitArgs;
        use creditline_contracts::lending::loan_ledger::LoanLedgerInitArgs;
        use creditline_contracts::lending::revenue_treasury::RevenueTreasuryInitArgs;
        use odra::host::NoArgs;

        let usdc = container.contract_ref::<AssetToken>(env)?;
        let price_oracle = container.contract_ref::<PriceOracle>(env)?;
        let score_oracle = container.contract_ref::<ScoreOracle>(env)?;
        let identity = container.contract_ref::<CreditIdentity>(env)?;
        let mut config = container.contract_ref::<ProtocolConfig>(env)?;

        let mut treasury = RevenueTreasury::load_or_deploy(
            &env,
            RevenueTreasuryInitArgs {
                asset_token: usdc.address().clone(),
            },
            container,
            500_000_000_000,
        )?;

        let mut collateral_ledger =
            CollateralLedger::load_or_deploy(&env, NoArgs, container, 300_000_000_000)?;

        let loan_ledger = LoanLedger::load_or_deploy(
            &env,
            LoanLedgerInitArgs {
                collateral_ledger: collateral_ledger.address().clone(),
                price_oracle: price_oracle.address().clone(),
                score_oracle: score_oracle.address().clone(),
                identity: identity.address().clone(),
                config: config.address().clone(),
                treasury: treasury.address().clone(),
                asset_token: usdc.address().clone(),
            },
            container,
            500_000_000_000,
        )?;

        let pool = LendingPool::load_or_deploy(
            &env,
            LendingPoolInitArgs {
                loan_ledger: loan_ledger.address().clone(),
                treasury: treasury.address().clone(),
                asset_token: usdc.address().clone(),
                // 10% APR
                interest_rate_annual: U256::from(10_000_000_000_000_000_000u128),
                allowed_scores: vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            },
            container,
            500_000_000_000,
        )?;

        env.set_gas(300_000_000_000);
        let ledger_address = loan_ledger.address().clone();
        let pool_address = pool.address().clone();
        collateral_ledger.set_loan_ledger(ledger_address);
        config.set_loan_ledger(ledger_address);
        treasury.set_loan_ledger(ledger_address);
        treasury.register_pool(pool_address);

        let mut loan_ledger = loan_ledger;
        loan_ledger.register_pool(pool_address);

        Ok(())
    }
}

/// Deploys the complete protocol (collaborators + core).
pub struct ProtocolDeployScript;

impl DeployScript for ProtocolDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer,
    ) -> Result<(), odra_cli::deploy::Error> {
        CollaboratorsDeployScript.deploy(env, container)?;
        CoreDeployScript.deploy(env, container)?;
        Ok(())
    }
}

/// Scenario to push a collateral price to the oracle.
pub struct SetPriceScenario;

impl Scenario for SetPriceScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "asset",
                "Address of the collateral asset",
                NamedCLType::Key,
            ),
            CommandArg::new(
                "price",
                "Spot price in principal smallest units per 1e18 collateral units",
                NamedCLType::U256,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args,
    ) -> Result<(), Error> {
        let mut oracle = container.contract_ref::<PriceOracle>(env)?;
        let asset = args.get_single::<Address>("asset")?;
        let price = args.get_single::<U256>("price")?;

        env.set_gas(50_000_000_000);
        oracle.try_set_price(asset, price)?;

        println!("Price updated!");
        Ok(())
    }
}

impl ScenarioMetadata for SetPriceScenario {
    const NAME: &'static str = "set-price";
    const DESCRIPTION: &'static str = "Pushes a spot price for a collateral asset";
}

/// Scenario to record a credit score for an identity.
pub struct SetScoreScenario;

impl Scenario for SetScoreScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new("token_id", "Credit identity id", NamedCLType::U64),
            CommandArg::new("score", "Credit score (1-10, lower is better)", NamedCLType::U8),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args,
    ) -> Result<(), Error> {
        let mut oracle = container.contract_ref::<ScoreOracle>(env)?;
        let token_id = args.get_single::<u64>("token_id")?;
        let score = args.get_single::<u8>("score")?;

        env.set_gas(50_000_000_000);
        oracle.try_set_score(token_id, score)?;

        println!("Score recorded!");
        Ok(())
    }
}

impl ScenarioMetadata for SetScoreScenario {
    const NAME: &'static str = "set-score";
    const DESCRIPTION: &'static str = "Records a credit score for an identity";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the credit line smart contracts")
        // Deploy scripts
        .deploy(CollaboratorsDeployScript)
        .deploy(CoreDeployScript)
        .deploy(ProtocolDeployScript)
        // Contract references
        .contract::<AssetToken>()
        .contract::<PriceOracle>()
        .contract::<ScoreOracle>()
        .contract::<CreditIdentity>()
        .contract::<ProtocolConfig>()
        .contract::<CollateralLedger>()
        .contract::<LoanLedger>()
        .contract::<LendingPool>()
        .contract::<RevenueTreasury>()
        // Scenarios
        .scenario(SetPriceScenario)
        .scenario(SetScoreScenario)
        .build()
        .run();
}
