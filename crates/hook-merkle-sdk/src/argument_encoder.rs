use alloy::primitives::Bytes;
use alloy::sol_types::SolValue;

use crate::argument_expander::AddressTuple;
use crate::hook_schema::HookSchema;

/// Pack a tuple as `abi.encodePacked(address, …)` in the schema's argument order.
///
/// Each present argument contributes its raw 20 bytes; omitted arguments contribute
/// nothing, so a tuple with no arguments encodes to empty bytes.
pub fn encode(tuple: &AddressTuple, schema: &HookSchema) -> Bytes {
    let mut packed = Vec::with_capacity(tuple.len() * 20);
    // element-wise: packing an address array would pad each entry to 32 bytes
    for address in schema.args.iter().filter_map(|arg| tuple.get(&arg.name)) {
        packed.extend_from_slice(&address.abi_encode_packed());
    }

    packed.into()
}
