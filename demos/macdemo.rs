use skein3fish::*;

fn main() {
    let data: &[u8] = &[2, 3, 5, 7, 11, 13, 17, 19];
    println!("data: {:?}", data);

    let digest = {
        let mut skein = new_hash(512, 256).unwrap();
        skein.update(data);
        skein.finalize()
    };
    println!("skein-512-256: {:?}", digest);

    let mut key = [0u8; 64];
    getrandom::getrandom(&mut key).unwrap();
    println!("key (part): {:?}", &key[..8]);

    let mut mac = new_mac(512, 256, &key).unwrap();
    mac.update(data);
    let tag = mac.finalize();
    println!("tag: {:?}", tag);

    // the same instance is ready for the next message under the same key
    mac.update(data);
    let valid = mac.finalize() == tag;
    assert!(valid);

    let mut bits = new_hash(512, 256).unwrap();
    bits.update_bits(&data[..2], 13).unwrap();
    println!("13-bit message: {:?}", bits.finalize());
}
