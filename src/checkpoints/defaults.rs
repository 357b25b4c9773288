//! Compiled-in checkpoints
//!
//! Only the primary network pins history out of the box. Test and staging
//! deployments start empty and rely on operator files or the remote feed.

pub const PRIMARY_CHECKPOINTS: &[(u64, &str)] = &[
    (1, "70993660d8935714ccc7f5ffbb2a270954b38033e1288e72846a8ac23c674d3b"),
    (10, "370ef03bafc23e96cc3b8075d9b11d637363a87d6961e6a0497ec32cecb46750"),
    (100, "b31ac0e238926c24a209479e9d85f2567cd80402efa3ff7ffa074ac979e687d5"),
    (200, "32b2909e2d2b82c7cdfea6284152ca2f29475bfeddaf1e3b040d470c369c7016"),
    (500, "4c8af01873e68644eca9334c2407387988d9ccf731519516c0512b59da53319b"),
    (10000, "9d923965202d3f10d78417ff1468b5036812f8eb7c694683f2e26cb67a9e11b2"),
    (20000, "1eba0557e26eed29e68226b1228211ea4f91aa32337c46d6c85a995a7c38ff17"),
    (50000, "8a308882d1888890d61b294c328f895f9447935f78391879b59b614e28749bcc"),
    (58500, "8a52ec5f274b7a5ee9e29dbb38178785de4fa654fc8e86a832ef5ae7c371fb9d"),
];
