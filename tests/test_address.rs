use ocean_datatoken::{decode_private_key, Address, AddressConvertible, PublicKey};

#[test]
fn test_upubkey_to_address() {
    let pubkey: PublicKey = (
        "04b90e9bb2617387eba4502c730de65a33878ef384a46f1096d86f2da19043304afa67d0ad09cf2bea0c6f2d1767a9e62a7a7ecc41facf18f2fa505d92243a658f"
    ).parse().unwrap();
    let ref_addr: Address = "d989829d88b0ed1b06edf5c50174ecfa64f14a64".parse().unwrap();
    assert_eq!(pubkey.address(), ref_addr);
}

#[test]
fn test_private_key_to_address() {
    // Classic reference pair.
    let key = decode_private_key(
        "0x0000000000000000000000000000000000000000000000000000000000000001",
    )
    .unwrap();
    let ref_addr: Address = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf".parse().unwrap();
    assert_eq!(key.address(), ref_addr);
}

#[test]
fn test_eip155_key_to_address() {
    // Account of the EIP-155 example transaction.
    let key = decode_private_key(
        "4646464646464646464646464646464646464646464646464646464646464646",
    )
    .unwrap();
    let ref_addr: Address = "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F".parse().unwrap();
    assert_eq!(key.address(), ref_addr);
}

#[test]
fn test_can_create_from_raw() {
    let _ = Address::from([0; 20]);
}

#[test]
fn test_to_checksum_address() {
    let addresses = vec![
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    addresses.iter().for_each(|&addr| {
        assert_eq!(addr, addr.parse::<Address>().unwrap().to_checksum_address());
    });
    addresses.iter().for_each(|&addr| {
        assert_eq!(
            addr,
            addr.to_lowercase()
                .parse::<Address>()
                .unwrap()
                .to_checksum_address()
        );
    });
}

#[test]
fn test_serde_round_trip() {
    let addr: Address = "0x7567d83b7b8d80addcb281a71d54fc7b3364ffed".parse().unwrap();
    let encoded = serde_json::to_string(&addr).unwrap();
    assert_eq!(encoded, "\"0x7567d83b7b8d80addcb281a71d54fc7b3364ffed\"");
    let decoded: Address = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, addr);
}
