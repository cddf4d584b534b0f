use crate::fd_gan::{Device, FdGanError};
use crate::tensor::Tensor;

#[test]
fn test_parse_device_requests() {
    assert_eq!("cpu".parse::<Device>().unwrap(), Device::Cpu);
    assert_eq!("cuda".parse::<Device>().unwrap(), Device::Cuda(0));
    assert_eq!(" CUDA:2 ".parse::<Device>().unwrap(), Device::Cuda(2));
    assert!(matches!(
        "tpu".parse::<Device>(),
        Err(FdGanError::DeviceUnavailable(_))
    ));
    assert!(matches!(
        "cuda:x".parse::<Device>(),
        Err(FdGanError::DeviceUnavailable(_))
    ));
}

#[test]
fn test_cuda_request_falls_back_to_cpu() {
    assert!(!Device::cuda_available());
    assert_eq!(Device::from_request("cuda").unwrap(), Device::Cpu);
    assert_eq!(Device::from_request("cuda:1").unwrap(), Device::Cpu);
    assert!(Device::from_request("cpu").unwrap().is_cpu());
}

#[test]
fn test_place_on_cpu_copies_tensor() {
    let tensor = Tensor::new(&[1., 2.], &[1, 2]);
    let placed = Device::Cpu.place(&tensor).unwrap();
    assert_eq!(placed.to_vec(), tensor.to_vec());
    assert!(Device::Cuda(0).place(&tensor).is_err());
    assert_eq!(Device::Cuda(3).to_string(), "cuda:3");
}
