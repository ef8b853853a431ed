//! Contract ABI definitions
//!
//! Each interface is the union of the functions the supported versions expose.
//! Which of them a deployed contract actually has is decided by its
//! [`SafeVersion`](super::SafeVersion), checked at the call sites in
//! [`Contract`](super::Contract).

use alloy::sol;

sol! {
    /// Safe singleton interface (v1.0.0 – v1.4.1)
    #[sol(rpc, all_derives)]
    interface ISafe {
        /// Contract name, removed in v1.3.0
        function NAME() external view returns (string memory);

        /// Contract version string
        function VERSION() external view returns (string memory);

        /// Execute a transaction (requires valid signatures)
        function execTransaction(
            address to,
            uint256 value,
            bytes calldata data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address payable refundReceiver,
            bytes memory signatures
        ) external payable returns (bool success);

        /// Marks a hash as approved by msg.sender
        function approveHash(bytes32 hashToApprove) external;

        /// Non-zero if `owner` approved `hash`
        function approvedHashes(address owner, bytes32 hash) external view returns (uint256);

        /// Non-zero if the message hash was signed through SignMessageLib
        function signedMessages(bytes32 messageHash) external view returns (uint256);

        /// Returns the current nonce of the Safe
        function nonce() external view returns (uint256 nonce);

        /// Returns the threshold (number of required signatures)
        function getThreshold() external view returns (uint256 threshold);

        /// Returns array of owners
        function getOwners() external view returns (address[] memory owners);

        /// Checks if an address is an owner
        function isOwner(address owner) external view returns (bool isOwner);

        /// All enabled modules, removed in v1.4.1
        function getModules() external view returns (address[] memory);

        /// A page of enabled modules starting after `start`
        function getModulesPaginated(address start, uint256 pageSize)
            external
            view
            returns (address[] memory array, address next);

        /// Checks if a module is enabled, added in v1.2.0
        function isModuleEnabled(address module) external view returns (bool);

        /// Gas used by a Safe transaction, reported through a revert; removed in v1.3.0
        function requiredTxGas(address to, uint256 value, bytes calldata data, uint8 operation)
            external
            returns (uint256);

        /// Returns the domain separator for EIP-712 signing
        function domainSeparator() external view returns (bytes32);

        /// Returns the chain ID, added in v1.3.0
        function getChainId() external view returns (uint256);

        /// Reads raw storage words, added in v1.3.0
        function getStorageAt(uint256 offset, uint256 length) external view returns (bytes memory);

        /// EIP-1271 message hash, moved to the fallback handler in v1.3.0
        function getMessageHash(bytes memory message) external view returns (bytes32);

        /// Computes the hash of a Safe transaction
        function getTransactionHash(
            address to,
            uint256 value,
            bytes calldata data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            uint256 _nonce
        ) external view returns (bytes32);

        /// Encodes transaction data
        function encodeTransactionData(
            address to,
            uint256 value,
            bytes calldata data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            uint256 _nonce
        ) external view returns (bytes memory);

        /// Reverts unless `signatures` satisfy the threshold for `dataHash`
        function checkSignatures(
            bytes32 dataHash,
            bytes memory data,
            bytes memory signatures
        ) external view;

        /// Reverts unless `signatures` holds `requiredSignatures` valid owner signatures, added in v1.3.0
        function checkNSignatures(
            bytes32 dataHash,
            bytes memory data,
            bytes memory signatures,
            uint256 requiredSignatures
        ) external view;

        /// Events
        event ExecutionSuccess(bytes32 indexed txHash, uint256 payment);
        event ExecutionFailure(bytes32 indexed txHash, uint256 payment);
        event ApproveHash(bytes32 indexed approvedHash, address indexed owner);
    }

    /// Safe.setup, used as the proxy initializer (v1.1.1 and later)
    #[sol(all_derives)]
    interface ISafeSetup {
        function setup(
            address[] calldata _owners,
            uint256 _threshold,
            address to,
            bytes calldata data,
            address fallbackHandler,
            address paymentToken,
            uint256 payment,
            address payable paymentReceiver
        ) external;
    }

    /// Safe proxy factory
    #[sol(rpc, all_derives)]
    interface ISafeProxyFactory {
        function createProxyWithNonce(address _singleton, bytes memory initializer, uint256 saltNonce)
            external
            returns (address proxy);

        function proxyCreationCode() external pure returns (bytes memory);

        event ProxyCreation(address indexed proxy, address singleton);
    }

    /// MultiSend interface for batching multiple calls
    #[sol(rpc, all_derives)]
    interface IMultiSend {
        /// Sends multiple transactions in a single call
        /// @param transactions Packed encoding of transactions:
        ///        operation (1 byte) | to (20 bytes) | value (32 bytes) | data length (32 bytes) | data
        function multiSend(bytes memory transactions) external payable;
    }

    /// MultiSendCallOnly - same as MultiSend but only allows Call operations (no DelegateCall)
    #[sol(rpc, all_derives)]
    interface IMultiSendCallOnly {
        function multiSend(bytes memory transactions) external payable;
    }

    /// CreateCall library for deploying contracts from a Safe
    #[sol(rpc, all_derives)]
    interface ICreateCall {
        function performCreate(uint256 value, bytes memory deploymentData)
            external
            returns (address newContract);

        function performCreate2(uint256 value, bytes memory deploymentData, bytes32 salt)
            external
            returns (address newContract);

        event ContractCreation(address newContract);
    }

    /// SignMessageLib, delegate-called by a Safe to mark messages as signed
    #[sol(rpc, all_derives)]
    interface ISignMessageLib {
        function signMessage(bytes calldata _data) external;

        function getMessageHash(bytes memory message) external view returns (bytes32);

        event SignMsg(bytes32 indexed msgHash);
    }

    /// CompatibilityFallbackHandler
    #[sol(rpc, all_derives)]
    interface ICompatibilityFallbackHandler {
        function getMessageHash(bytes memory message) external view returns (bytes32);

        function getMessageHashForSafe(address safe, bytes memory message) external view returns (bytes32);

        function isValidSignature(bytes32 _dataHash, bytes calldata _signature) external view returns (bytes4);

        function getModules() external view returns (address[] memory);
    }

    /// ERC20 interface for common token operations
    #[sol(rpc, all_derives)]
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);

        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);
    }
}
