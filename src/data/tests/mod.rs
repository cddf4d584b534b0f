mod dataloader;
mod synthetic;
