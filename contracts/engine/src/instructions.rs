// Multiprocess Instruction Codec
//
// One instruction per frame. The leading byte carries the opcode in
// its low nibble and the use_max flag in its high nibble. A payload
// opening with the jump marker batches frames: marker, count, then
// count length-prefixed frames, all executed in one settlement
// window. Integers are big-endian; addresses are length-prefixed XDR.

use soroban_sdk::{
    panic_with_error,
    xdr::{FromXdr, ToXdr},
    Address, Bytes, Env, Vec,
};

use crate::error::EngineError;

pub const OP_ALLOCATE: u8 = 0x01;
pub const OP_DEALLOCATE: u8 = 0x03;
pub const OP_CLAIM: u8 = 0x04;
pub const OP_SWAP: u8 = 0x05;
pub const OP_CREATE_POOL: u8 = 0x0B;
pub const OP_CREATE_PAIR: u8 = 0x0C;

pub const JUMP_MARKER: u8 = 0xAA;

const USE_MAX_FLAG: u8 = 0x10;

/// A decoded instruction, ready for the dispatcher
#[derive(Clone, Debug)]
pub enum Instruction {
    CreatePair {
        asset: Address,
        quote: Address,
    },
    CreatePool {
        pair_ref: u32,
        controller: Option<Address>,
        priority_fee_bps: u32,
        fee_bps: u32,
        volatility_bps: u32,
        duration_seconds: u64,
        jit_seconds: u32,
        max_price: u128,
        price: u128,
    },
    Allocate {
        use_max: bool,
        pool_id: u64,
        delta_liquidity: u128,
    },
    Deallocate {
        use_max: bool,
        pool_id: u64,
        delta_liquidity: u128,
    },
    Swap {
        use_max: bool,
        pool_id: u64,
        sell_asset: bool,
        input: u128,
        min_output: u128,
    },
    Claim {
        pool_id: u64,
        delta_asset: u128,
        delta_quote: u128,
    },
}

// ============================================================
// DECODING
// ============================================================

struct Reader<'a> {
    env: &'a Env,
    bytes: Bytes,
    pos: u32,
}

impl<'a> Reader<'a> {
    fn new(env: &'a Env, bytes: &Bytes) -> Self {
        Self {
            env,
            bytes: bytes.clone(),
            pos: 0,
        }
    }

    fn take(&mut self, n: u32) -> Bytes {
        let end = match self.pos.checked_add(n) {
            Some(end) if end <= self.bytes.len() => end,
            _ => panic_with_error!(self.env, EngineError::InvalidInstruction),
        };
        let slice = self.bytes.slice(self.pos..end);
        self.pos = end;
        slice
    }

    fn array<const N: usize>(&mut self) -> [u8; N] {
        let slice = self.take(N as u32);
        let mut buf = [0u8; N];
        slice.copy_into_slice(&mut buf);
        buf
    }

    fn u8(&mut self) -> u8 {
        self.array::<1>()[0]
    }

    fn u16(&mut self) -> u16 {
        u16::from_be_bytes(self.array::<2>())
    }

    fn u32(&mut self) -> u32 {
        u32::from_be_bytes(self.array::<4>())
    }

    fn u64(&mut self) -> u64 {
        u64::from_be_bytes(self.array::<8>())
    }

    fn u128(&mut self) -> u128 {
        u128::from_be_bytes(self.array::<16>())
    }

    fn flag(&mut self) -> bool {
        match self.u8() {
            0 => false,
            1 => true,
            _ => panic_with_error!(self.env, EngineError::InvalidInstruction),
        }
    }

    fn address(&mut self) -> Address {
        let len = self.u32();
        let xdr = self.take(len);
        match Address::from_xdr(self.env, &xdr) {
            Ok(address) => address,
            Err(_) => panic_with_error!(self.env, EngineError::InvalidInstruction),
        }
    }

    fn finish(&self) {
        if self.pos != self.bytes.len() {
            panic_with_error!(self.env, EngineError::InvalidInstruction);
        }
    }
}

/// Decode a single instruction frame; rejects trailing bytes
pub fn decode_one(env: &Env, frame: &Bytes) -> Instruction {
    let mut reader = Reader::new(env, frame);
    let lead = reader.u8();
    let use_max = match lead >> 4 {
        0 => false,
        1 => true,
        _ => panic_with_error!(env, EngineError::InvalidInstruction),
    };
    let opcode = lead & 0x0F;

    let instruction = match opcode {
        OP_CREATE_PAIR if !use_max => Instruction::CreatePair {
            asset: reader.address(),
            quote: reader.address(),
        },
        OP_CREATE_POOL if !use_max => {
            let pair_ref = reader.u32();
            let controller = if reader.flag() {
                Some(reader.address())
            } else {
                None
            };
            Instruction::CreatePool {
                pair_ref,
                controller,
                priority_fee_bps: reader.u32(),
                fee_bps: reader.u32(),
                volatility_bps: reader.u32(),
                duration_seconds: reader.u64(),
                jit_seconds: reader.u32(),
                max_price: reader.u128(),
                price: reader.u128(),
            }
        }
        OP_ALLOCATE => Instruction::Allocate {
            use_max,
            pool_id: reader.u64(),
            delta_liquidity: reader.u128(),
        },
        OP_DEALLOCATE => Instruction::Deallocate {
            use_max,
            pool_id: reader.u64(),
            delta_liquidity: reader.u128(),
        },
        OP_SWAP => {
            let pool_id = reader.u64();
            let sell_asset = reader.flag();
            Instruction::Swap {
                use_max,
                pool_id,
                sell_asset,
                input: reader.u128(),
                min_output: reader.u128(),
            }
        }
        OP_CLAIM if !use_max => Instruction::Claim {
            pool_id: reader.u64(),
            delta_asset: reader.u128(),
            delta_quote: reader.u128(),
        },
        _ => panic_with_error!(env, EngineError::InvalidInstruction),
    };

    reader.finish();
    instruction
}

/// Walk a payload, calling `execute` per decoded instruction
pub fn execute_payload<F: FnMut(Instruction)>(env: &Env, payload: &Bytes, mut execute: F) {
    if payload.is_empty() {
        panic_with_error!(env, EngineError::InvalidInstruction);
    }

    if payload.get_unchecked(0) == JUMP_MARKER {
        let mut reader = Reader::new(env, payload);
        let _ = reader.u8();
        let count = reader.u8();
        if count == 0 {
            panic_with_error!(env, EngineError::InvalidInstruction);
        }
        let mut executed = 0u8;
        while executed < count {
            let length = reader.u16() as u32;
            let frame = reader.take(length);
            execute(decode_one(env, &frame));
            executed += 1;
        }
        reader.finish();
    } else {
        execute(decode_one(env, payload));
    }
}

// ============================================================
// ENCODING
// ============================================================
// Mirrors of the decoders, used by clients and the test-suite.

fn append(env: &Env, out: &mut Bytes, data: &[u8]) {
    out.append(&Bytes::from_slice(env, data));
}

fn append_address(env: &Env, out: &mut Bytes, address: &Address) {
    let xdr = address.clone().to_xdr(env);
    append(env, out, &xdr.len().to_be_bytes());
    out.append(&xdr);
}

fn lead_byte(opcode: u8, use_max: bool) -> u8 {
    if use_max {
        opcode | USE_MAX_FLAG
    } else {
        opcode
    }
}

pub fn encode_create_pair(env: &Env, asset: &Address, quote: &Address) -> Bytes {
    let mut out = Bytes::from_slice(env, &[OP_CREATE_PAIR]);
    append_address(env, &mut out, asset);
    append_address(env, &mut out, quote);
    out
}

pub fn encode_create_pool(
    env: &Env,
    pair_ref: u32,
    controller: &Option<Address>,
    priority_fee_bps: u32,
    fee_bps: u32,
    volatility_bps: u32,
    duration_seconds: u64,
    jit_seconds: u32,
    max_price: u128,
    price: u128,
) -> Bytes {
    let mut out = Bytes::from_slice(env, &[OP_CREATE_POOL]);
    append(env, &mut out, &pair_ref.to_be_bytes());
    match controller {
        Some(address) => {
            append(env, &mut out, &[1]);
            append_address(env, &mut out, address);
        }
        None => append(env, &mut out, &[0]),
    }
    append(env, &mut out, &priority_fee_bps.to_be_bytes());
    append(env, &mut out, &fee_bps.to_be_bytes());
    append(env, &mut out, &volatility_bps.to_be_bytes());
    append(env, &mut out, &duration_seconds.to_be_bytes());
    append(env, &mut out, &jit_seconds.to_be_bytes());
    append(env, &mut out, &max_price.to_be_bytes());
    append(env, &mut out, &price.to_be_bytes());
    out
}

pub fn encode_allocate(env: &Env, use_max: bool, pool_id: u64, delta_liquidity: u128) -> Bytes {
    let mut out = Bytes::from_slice(env, &[lead_byte(OP_ALLOCATE, use_max)]);
    append(env, &mut out, &pool_id.to_be_bytes());
    append(env, &mut out, &delta_liquidity.to_be_bytes());
    out
}

pub fn encode_deallocate(env: &Env, use_max: bool, pool_id: u64, delta_liquidity: u128) -> Bytes {
    let mut out = Bytes::from_slice(env, &[lead_byte(OP_DEALLOCATE, use_max)]);
    append(env, &mut out, &pool_id.to_be_bytes());
    append(env, &mut out, &delta_liquidity.to_be_bytes());
    out
}

pub fn encode_swap(
    env: &Env,
    use_max: bool,
    pool_id: u64,
    sell_asset: bool,
    input: u128,
    min_output: u128,
) -> Bytes {
    let mut out = Bytes::from_slice(env, &[lead_byte(OP_SWAP, use_max)]);
    append(env, &mut out, &pool_id.to_be_bytes());
    append(env, &mut out, &[sell_asset as u8]);
    append(env, &mut out, &input.to_be_bytes());
    append(env, &mut out, &min_output.to_be_bytes());
    out
}

pub fn encode_claim(env: &Env, pool_id: u64, delta_asset: u128, delta_quote: u128) -> Bytes {
    let mut out = Bytes::from_slice(env, &[OP_CLAIM]);
    append(env, &mut out, &pool_id.to_be_bytes());
    append(env, &mut out, &delta_asset.to_be_bytes());
    append(env, &mut out, &delta_quote.to_be_bytes());
    out
}

pub fn encode_jump(env: &Env, frames: &Vec<Bytes>) -> Bytes {
    if frames.is_empty() || frames.len() > u8::MAX as u32 {
        panic_with_error!(env, EngineError::InvalidInstruction);
    }
    let mut out = Bytes::from_slice(env, &[JUMP_MARKER, frames.len() as u8]);
    for frame in frames.iter() {
        if frame.len() > u16::MAX as u32 {
            panic_with_error!(env, EngineError::InvalidInstruction);
        }
        append(env, &mut out, &(frame.len() as u16).to_be_bytes());
        out.append(&frame);
    }
    out
}
