//! Read-only ERC-20 calls over raw calldata
//!
//! Only the four view functions the commitment flow needs are encoded here;
//! pulling in a full ABI machinery for that would be overkill.

use alloy_primitives::{Address, U256};
use anyhow::{anyhow, Result};
use tracing::warn;

use crate::rpc::RpcClient;

/// `balanceOf(address)`
const SELECTOR_BALANCE_OF: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];
/// `decimals()`
const SELECTOR_DECIMALS: [u8; 4] = [0x31, 0x3c, 0xe5, 0x67];
/// `symbol()`
const SELECTOR_SYMBOL: [u8; 4] = [0x95, 0xd8, 0x9b, 0x41];
/// `name()`
const SELECTOR_NAME: [u8; 4] = [0x06, 0xfd, 0xde, 0x03];

/// Token metadata, for display only.
#[derive(Clone, Debug)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// One ERC-20 contract on the connected chain.
#[derive(Clone, Debug)]
pub struct Erc20 {
    client: RpcClient,
    token: Address,
}

impl Erc20 {
    /// Wrap a token contract address.
    pub fn new(client: RpcClient, token: Address) -> Self {
        Self { client, token }
    }

    /// The token contract address.
    pub fn address(&self) -> Address {
        self.token
    }

    /// Balance of `holder` in the token's smallest unit.
    pub async fn balance_of(&self, holder: Address) -> Result<U256> {
        let calldata = encode_call(SELECTOR_BALANCE_OF, Some(holder));
        let ret = self.client.eth_call(self.token, calldata).await?;
        decode_uint(&ret)
    }

    /// Name, symbol and decimals. The metadata functions are optional in the
    /// ERC-20 standard, so failures fall back to defaults instead of aborting
    /// the run.
    pub async fn metadata(&self) -> TokenMetadata {
        let name = match self.read_string(SELECTOR_NAME).await {
            Ok(name) => name,
            Err(error) => {
                warn!(%error, "token name() failed, using fallback");
                "ERC20 Token".to_string()
            }
        };
        let symbol = match self.read_string(SELECTOR_SYMBOL).await {
            Ok(symbol) => symbol,
            Err(error) => {
                warn!(%error, "token symbol() failed, using fallback");
                "UNKNOWN".to_string()
            }
        };
        let decimals = match self.read_decimals().await {
            Ok(decimals) => decimals,
            Err(error) => {
                warn!(%error, "token decimals() failed, assuming 18");
                18
            }
        };
        TokenMetadata { name, symbol, decimals }
    }

    async fn read_string(&self, selector: [u8; 4]) -> Result<String> {
        let ret = self
            .client
            .eth_call(self.token, encode_call(selector, None))
            .await?;
        decode_string(&ret)
    }

    async fn read_decimals(&self) -> Result<u8> {
        let ret = self
            .client
            .eth_call(self.token, encode_call(SELECTOR_DECIMALS, None))
            .await?;
        let value = decode_uint(&ret)?;
        u8::try_from(value).map_err(|_| anyhow!("decimals() out of u8 range: {value}"))
    }
}

/// Build calldata: 4-byte selector plus an optional address argument padded
/// to a 32-byte word.
fn encode_call(selector: [u8; 4], arg: Option<Address>) -> Vec<u8> {
    let mut data = selector.to_vec();
    if let Some(address) = arg {
        data.extend_from_slice(&[0u8; 12]);
        data.extend_from_slice(address.as_slice());
    }
    data
}

/// Decode a single ABI `uint256` return value.
fn decode_uint(ret: &[u8]) -> Result<U256> {
    if ret.len() < 32 {
        return Err(anyhow!("uint256 return too short: {} bytes", ret.len()));
    }
    Ok(U256::from_be_slice(&ret[..32]))
}

/// Decode a single ABI `string` return value (offset word, length word,
/// UTF-8 bytes).
fn decode_string(ret: &[u8]) -> Result<String> {
    if ret.len() < 64 {
        return Err(anyhow!("string return too short: {} bytes", ret.len()));
    }
    let offset = usize::try_from(U256::from_be_slice(&ret[..32]))
        .map_err(|_| anyhow!("string offset overflows usize"))?;
    let length_word = ret
        .get(offset..offset + 32)
        .ok_or_else(|| anyhow!("string offset out of bounds"))?;
    let length = usize::try_from(U256::from_be_slice(length_word))
        .map_err(|_| anyhow!("string length overflows usize"))?;
    let bytes = ret
        .get(offset + 32..offset + 32 + length)
        .ok_or_else(|| anyhow!("string body out of bounds"))?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_balance_of_calldata() {
        let holder: Address = "0x1111111111111111111111111111111111111111"
            .parse()
            .unwrap();
        let calldata = encode_call(SELECTOR_BALANCE_OF, Some(holder));

        assert_eq!(calldata.len(), 36);
        assert_eq!(&calldata[..4], &[0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(&calldata[4..16], &[0u8; 12]);
        assert_eq!(&calldata[16..], holder.as_slice());
    }

    #[test]
    fn encodes_nullary_calldata() {
        assert_eq!(encode_call(SELECTOR_DECIMALS, None), vec![0x31, 0x3c, 0xe5, 0x67]);
    }

    #[test]
    fn decodes_uint256_returns() {
        let mut ret = [0u8; 32];
        ret[30] = 0x01;
        ret[31] = 0x02;
        assert_eq!(decode_uint(&ret).unwrap(), U256::from(0x0102u64));
        assert!(decode_uint(&ret[..16]).is_err());
    }

    #[test]
    fn decodes_abi_strings() {
        // offset = 0x20, length = 4, body = "TEST"
        let mut ret = vec![0u8; 96];
        ret[31] = 0x20;
        ret[63] = 4;
        ret[64..68].copy_from_slice(b"TEST");
        assert_eq!(decode_string(&ret).unwrap(), "TEST");
    }

    #[test]
    fn rejects_truncated_strings() {
        assert!(decode_string(&[0u8; 32]).is_err());

        // Length word claims more bytes than the blob carries.
        let mut ret = vec![0u8; 96];
        ret[31] = 0x20;
        ret[63] = 64;
        assert!(decode_string(&ret).is_err());
    }
}
