//! Solidity bindings of the account.
//!
//! The ABI layout matches zkSync's `IAccount` interface, so calldata produced by a real
//! bootloader decodes here and the selectors line up with the on-chain ones.

use alloy_sol_types::sol;

sol! {
    /// The transaction layout the bootloader passes to account methods.
    #[derive(Debug, PartialEq, Eq)]
    struct Transaction {
        uint256 txType;
        uint256 from;
        uint256 to;
        uint256 gasLimit;
        uint256 gasPerPubdataByteLimit;
        uint256 maxFeePerGas;
        uint256 maxPriorityFeePerGas;
        uint256 paymaster;
        uint256 nonce;
        uint256 value;
        uint256[4] reserved;
        bytes data;
        bytes signature;
        bytes32[] factoryDeps;
        bytes paymasterInput;
        bytes reservedDynamic;
    }

    /// Entry points of the account.
    interface IAccount {
        function validateTransaction(
            bytes32 txHash,
            bytes32 suggestedSignedHash,
            Transaction calldata transaction
        ) external payable returns (bytes4 magic);

        function executeTransaction(
            bytes32 txHash,
            bytes32 suggestedSignedHash,
            Transaction calldata transaction
        ) external payable;

        function executeTransactionFromOutside(Transaction calldata transaction) external payable;

        function payForTransaction(
            bytes32 txHash,
            bytes32 suggestedSignedHash,
            Transaction calldata transaction
        ) external payable;

        function prepareForPaymaster(
            bytes32 txHash,
            bytes32 possibleSignedHash,
            Transaction calldata transaction
        ) external payable;

        function owner() external view returns (address);

        function transferOwnership(address newOwner) external;
    }

    /// Errors the account reverts with.
    interface IAccountErrors {
        error NotFromBootloader();
        error NotFromBootloaderOrOwner();
        error NotEnoughBalance();
        error FailedToPay();
        error ExecutionFailed();
        error Unauthorized();
        error ValueOverflow(uint256 value);
        error FeeOverflow();
        error UnsupportedTxType(uint256 txType);
        error FieldOverflow();
        error ECDSAInvalidSignature();
        error ECDSAInvalidSignatureLength(uint256 length);
        error ECDSAInvalidSignatureS(bytes32 s);
        error OwnableUnauthorizedAccount(address account);
        error OwnableInvalidOwner(address owner);
    }

    /// Errors raised by the host's system contracts.
    interface IHostErrors {
        error NonceMismatch(uint256 expected, uint256 provided);
        error InsufficientFunds(uint256 required, uint256 available);
        error NonceOverflow(uint256 nonce);
        error BalanceOverflow(address account);
    }
}

/// The EIP-712 typed-data view of a zkSync transaction.
pub mod eip712 {
    use alloy_sol_types::sol;

    sol! {
        /// The struct signed by EIP-712 (type 113) transactions.
        #[derive(Debug, PartialEq, Eq)]
        struct Transaction {
            uint256 txType;
            uint256 from;
            uint256 to;
            uint256 gasLimit;
            uint256 gasPerPubdataByteLimit;
            uint256 maxFeePerGas;
            uint256 maxPriorityFeePerGas;
            uint256 paymaster;
            uint256 nonce;
            uint256 value;
            bytes data;
            bytes32[] factoryDeps;
            bytes paymasterInput;
        }
    }
}
