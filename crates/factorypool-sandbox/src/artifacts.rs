use crate::state::ChainState;
use factorypool_client::{Artifacts, ContractArtifact, DeployedAddresses};
use serde_json::{json, Value};

fn param(name: &str, kind: &str) -> Value {
    json!({ "name": name, "type": kind, "internalType": kind })
}

fn function(name: &str, inputs: Vec<Value>, outputs: Vec<Value>, mutability: &str) -> Value {
    json!({
        "type": "function",
        "name": name,
        "inputs": inputs,
        "outputs": outputs,
        "stateMutability": mutability,
    })
}

/// ABI of the Crowdfunding contract as deployed to the sandbox
pub fn crowdfunding_artifact() -> ContractArtifact {
    let campaign = json!({
        "name": "",
        "type": "tuple",
        "internalType": "struct Crowdfunding.Campaign",
        "components": [
            param("creator", "address"),
            param("title", "string"),
            param("fundingGoal", "uint256"),
            param("totalRaised", "uint256"),
            param("deadline", "uint256"),
            param("finalized", "bool"),
        ],
    });

    ContractArtifact {
        contract_name: Some("Crowdfunding".to_string()),
        abi: vec![
            function("campaignCount", vec![], vec![param("", "uint256")], "view"),
            function(
                "getCampaign",
                vec![param("_campaignId", "uint256")],
                vec![campaign],
                "view",
            ),
            function(
                "createCampaign",
                vec![
                    param("_title", "string"),
                    param("_fundingGoal", "uint256"),
                    param("_durationInSeconds", "uint256"),
                ],
                vec![],
                "nonpayable",
            ),
            function(
                "contribute",
                vec![param("_campaignId", "uint256")],
                vec![],
                "payable",
            ),
            function(
                "finalizeCampaign",
                vec![param("_campaignId", "uint256")],
                vec![],
                "nonpayable",
            ),
        ],
    }
}

/// ABI subset of the ERC-20 reward token
pub fn reward_token_artifact() -> ContractArtifact {
    ContractArtifact {
        contract_name: Some("RewardToken".to_string()),
        abi: vec![
            function("name", vec![], vec![param("", "string")], "view"),
            function("symbol", vec![], vec![param("", "string")], "view"),
            function("decimals", vec![], vec![param("", "uint8")], "view"),
            function(
                "balanceOf",
                vec![param("account", "address")],
                vec![param("", "uint256")],
                "view",
            ),
        ],
    }
}

/// Artifacts pointing at the contracts deployed in `state`
pub fn sandbox_artifacts(state: &ChainState) -> Artifacts {
    Artifacts {
        crowdfunding: crowdfunding_artifact(),
        reward_token: reward_token_artifact(),
        addresses: DeployedAddresses {
            crowdfunding: state.crowdfunding,
            reward_token: state.reward_token,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sandbox_artifacts_load_back() {
        let state = ChainState::genesis().unwrap();
        let artifacts = sandbox_artifacts(&state);
        artifacts.validate().unwrap();

        let dir = TempDir::new().unwrap();
        artifacts.write(dir.path()).unwrap();
        let loaded = Artifacts::load(dir.path()).unwrap();
        assert_eq!(loaded, artifacts);
        assert_eq!(loaded.addresses.crowdfunding, state.crowdfunding);
    }
}
