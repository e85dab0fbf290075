//! Embedded ABI descriptors
//!
//! Pure data mirroring the deployed contract interfaces: the fungible
//! marketplace token, the agent registry, the agent contract, and the
//! two job-escrow variants. The single-payer escrow has no
//! `setJobAccepted`; the multi-payer variant adds it along with
//! per-payer amount tracking.

/// Mutability of an ABI function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    View,
    NonPayable,
}

/// One ABI function descriptor: name, positional input types, output
/// types. Types use the contract ABI vocabulary ("address", "uint256",
/// "bytes", "bool", "string", "address[]").
#[derive(Debug, Clone, Copy)]
pub struct AbiFunction {
    pub name: &'static str,
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub mutability: Mutability,
}

/// A contract interface: its functions plus constructor input types.
#[derive(Debug, Clone, Copy)]
pub struct AbiDescriptor {
    pub functions: &'static [AbiFunction],
    pub constructor_inputs: &'static [&'static str],
}

impl AbiDescriptor {
    /// Look up a function by name.
    pub fn function(&self, name: &str) -> Option<&'static AbiFunction> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// Everything a host's deployment facility needs to instantiate a fresh
/// job escrow for a hire: constructor input shape plus creation
/// bytecode.
#[derive(Debug, Clone, Copy)]
pub struct JobDeployment {
    pub constructor_inputs: &'static [&'static str],
    pub bytecode: &'static str,
}

const fn view(name: &'static str, inputs: &'static [&'static str], outputs: &'static [&'static str]) -> AbiFunction {
    AbiFunction {
        name,
        inputs,
        outputs,
        mutability: Mutability::View,
    }
}

const fn nonpayable(name: &'static str, inputs: &'static [&'static str], outputs: &'static [&'static str]) -> AbiFunction {
    AbiFunction {
        name,
        inputs,
        outputs,
        mutability: Mutability::NonPayable,
    }
}

/// Fungible marketplace token (ERC-20 surface plus supply constants).
pub static TOKEN_ABI: AbiDescriptor = AbiDescriptor {
    functions: &[
        view("balanceOf", &["address"], &["uint256"]),
        view("allowance", &["address", "address"], &["uint256"]),
        view("totalSupply", &[], &["uint256"]),
        nonpayable("transfer", &["address", "uint256"], &["bool"]),
        nonpayable("transferFrom", &["address", "address", "uint256"], &["bool"]),
        nonpayable("approve", &["address", "uint256"], &["bool"]),
    ],
    constructor_inputs: &[],
};

/// Agent registry: the on-ledger directory of service agents.
pub static REGISTRY_ABI: AbiDescriptor = AbiDescriptor {
    functions: &[view("listAgents", &[], &["address[]"])],
    constructor_inputs: &[],
};

/// An individual agent contract, queried for listing metadata.
pub static AGENT_ABI: AbiDescriptor = AbiDescriptor {
    functions: &[
        view("name", &[], &["string"]),
        view("endpoint", &[], &["string"]),
    ],
    constructor_inputs: &[],
};

/// Single-payer job escrow.
pub static SIMPLE_JOB_ABI: AbiDescriptor = AbiDescriptor {
    functions: &[
        nonpayable("deposit", &["uint256"], &[]),
        nonpayable("withdraw", &[], &[]),
        nonpayable("setJobCompleted", &["bytes"], &[]),
        view("jobAccepted", &[], &["bool"]),
        view("jobCompleted", &[], &["bool"]),
        view("jobResult", &[], &["bytes"]),
        view("jobDescriptor", &[], &["bytes"]),
        view("payer", &[], &["address"]),
        view("agent", &[], &["address"]),
        view("token", &[], &["address"]),
    ],
    constructor_inputs: &["address", "address", "bytes"],
};

/// Multi-payer job escrow: adds explicit acceptance and per-payer
/// amount tracking.
pub static MARKET_JOB_ABI: AbiDescriptor = AbiDescriptor {
    functions: &[
        nonpayable("deposit", &["uint256"], &[]),
        nonpayable("withdraw", &[], &[]),
        nonpayable("setJobAccepted", &[], &[]),
        nonpayable("setJobCompleted", &["bytes"], &[]),
        view("amounts", &["address"], &["uint256", "uint256"]),
        view("jobAccepted", &[], &["bool"]),
        view("jobCompleted", &[], &["bool"]),
        view("jobResult", &[], &["bytes"]),
        view("jobDescriptor", &[], &["bytes"]),
        view("payer", &[], &["address"]),
        view("masterAgent", &[], &["address"]),
        view("token", &[], &["address"]),
    ],
    constructor_inputs: &["address[]", "uint256[]", "uint256[]", "address", "address", "bytes"],
};
